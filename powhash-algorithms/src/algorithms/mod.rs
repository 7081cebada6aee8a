/// Proof-of-work hash routines grouped by construction

pub mod boolberry;
pub mod chained;
pub mod cryptonight;
pub mod lyra2;
pub mod neoscrypt;
pub mod scrypt;

pub use boolberry::{boolberry_hash, WildKeccakVariant, WILD_KECCAK2_HEIGHT};
pub use chained::{
    bcrypt_hash, blake2s_hash, blake_hash, c11_hash, dcrypt_hash, fresh_hash, fugue_hash,
    groestl_hash, groestlmyriad_hash, hefty1_hash, jh_hash, keccak_hash, nist5_hash, quark_hash,
    qubit_hash, s3_hash, sha1_hash, shavite3_hash, skein_hash, whirlpoolx_hash, x11_hash,
    x13_hash, x14_hash, x15_hash, x17_hash, x5_hash, zr5_hash,
};
pub use cryptonight::{cryptonight_fast_hash, cryptonight_hash};
pub use lyra2::{lyra2re2_hash, lyra2re_hash};
pub use neoscrypt::{neoscrypt_hash, NeoscryptMode, NeoscryptProfile, NEOSCRYPT_INPUT_LEN};
pub use scrypt::{scrypt_hash, yescrypt_hash, ScryptCost};
