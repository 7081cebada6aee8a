/// Hash stages used by the chained proof-of-work constructions
///
/// Stages with a RustCrypto primitive behind them are exact: Keccak, SHA,
/// BLAKE2s, Groestl, JH, Skein, Shabal and Whirlpool. The others are served
/// by a BLAKE2b stand-in of the stage's output width, prefixed with
/// the stage tag, so a chain stays deterministic and every stage stays
/// distinct from every other.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Blake2s256, Digest};
use groestl::{Groestl256, Groestl512};
use jh::{Jh256, Jh512};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use sha3::{Keccak256, Keccak512};
use shabal::Shabal512;
use skein::consts::U64;
use skein::{Skein256, Skein512};
use whirlpool::Whirlpool;

use crate::algorithms::lyra2;

/// A single hash function applied inside a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Blake256,
    Blake512,
    Bmw256,
    Bmw512,
    Groestl256,
    Groestl512,
    Jh256,
    Jh512,
    Keccak256,
    Keccak512,
    Skein256,
    Skein512,
    Luffa512,
    Cubehash256,
    Cubehash512,
    Shavite512,
    Simd512,
    Echo512,
    Hamsi512,
    Fugue256,
    Fugue512,
    Shabal512,
    Whirlpool512,
    Haval256,
    Sha1,
    Sha256,
    Sha512,
    Blake2s256,
    Bcrypt,
    Dcrypt,
    Hefty1,
    /// Lyra2 matrix sponge with its (time cost, rows, columns) tuning
    Lyra2 {
        time_cost: u32,
        rows: u32,
        cols: u32,
    },
}

impl Stage {
    /// Short tag, also used as the stand-in domain separator
    pub fn tag(&self) -> &'static str {
        match self {
            Stage::Blake256 => "blake256",
            Stage::Blake512 => "blake512",
            Stage::Bmw256 => "bmw256",
            Stage::Bmw512 => "bmw512",
            Stage::Groestl256 => "groestl256",
            Stage::Groestl512 => "groestl512",
            Stage::Jh256 => "jh256",
            Stage::Jh512 => "jh512",
            Stage::Keccak256 => "keccak256",
            Stage::Keccak512 => "keccak512",
            Stage::Skein256 => "skein256",
            Stage::Skein512 => "skein512",
            Stage::Luffa512 => "luffa512",
            Stage::Cubehash256 => "cubehash256",
            Stage::Cubehash512 => "cubehash512",
            Stage::Shavite512 => "shavite512",
            Stage::Simd512 => "simd512",
            Stage::Echo512 => "echo512",
            Stage::Hamsi512 => "hamsi512",
            Stage::Fugue256 => "fugue256",
            Stage::Fugue512 => "fugue512",
            Stage::Shabal512 => "shabal512",
            Stage::Whirlpool512 => "whirlpool512",
            Stage::Haval256 => "haval256",
            Stage::Sha1 => "sha1",
            Stage::Sha256 => "sha256",
            Stage::Sha512 => "sha512",
            Stage::Blake2s256 => "blake2s256",
            Stage::Bcrypt => "bcrypt",
            Stage::Dcrypt => "dcrypt",
            Stage::Hefty1 => "hefty1",
            Stage::Lyra2 { .. } => "lyra2",
        }
    }

    /// Number of bytes the stage emits
    pub fn output_len(&self) -> usize {
        match self {
            Stage::Sha1 => 20,
            Stage::Blake512
            | Stage::Bmw512
            | Stage::Groestl512
            | Stage::Jh512
            | Stage::Keccak512
            | Stage::Skein512
            | Stage::Luffa512
            | Stage::Cubehash512
            | Stage::Shavite512
            | Stage::Simd512
            | Stage::Echo512
            | Stage::Hamsi512
            | Stage::Fugue512
            | Stage::Shabal512
            | Stage::Whirlpool512
            | Stage::Sha512 => 64,
            _ => 32,
        }
    }

    /// Whether the stage computes the real function rather than a stand-in
    pub fn is_exact(&self) -> bool {
        matches!(
            self,
            Stage::Groestl256
                | Stage::Groestl512
                | Stage::Jh256
                | Stage::Jh512
                | Stage::Keccak256
                | Stage::Keccak512
                | Stage::Skein256
                | Stage::Skein512
                | Stage::Shabal512
                | Stage::Whirlpool512
                | Stage::Sha1
                | Stage::Sha256
                | Stage::Sha512
                | Stage::Blake2s256
        )
    }

    /// Hash `data` with this stage
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        match *self {
            Stage::Groestl256 => Groestl256::digest(data).to_vec(),
            Stage::Groestl512 => Groestl512::digest(data).to_vec(),
            Stage::Jh256 => Jh256::digest(data).to_vec(),
            Stage::Jh512 => Jh512::digest(data).to_vec(),
            Stage::Keccak256 => Keccak256::digest(data).to_vec(),
            Stage::Keccak512 => Keccak512::digest(data).to_vec(),
            Stage::Skein256 => Skein256::<U32>::digest(data).to_vec(),
            Stage::Skein512 => Skein512::<U64>::digest(data).to_vec(),
            Stage::Shabal512 => Shabal512::digest(data).to_vec(),
            Stage::Whirlpool512 => Whirlpool::digest(data).to_vec(),
            Stage::Sha1 => Sha1::digest(data).to_vec(),
            Stage::Sha256 => Sha256::digest(data).to_vec(),
            Stage::Sha512 => Sha512::digest(data).to_vec(),
            Stage::Blake2s256 => Blake2s256::digest(data).to_vec(),
            Stage::Lyra2 {
                time_cost,
                rows,
                cols,
            } => lyra2::lyra2(data, time_cost, rows, cols).to_vec(),
            _ => stand_in(self.tag(), self.output_len(), data),
        }
    }
}

/// Tag-prefixed BLAKE2b of the requested width (32 or 64 bytes)
fn stand_in(tag: &str, output_len: usize, data: &[u8]) -> Vec<u8> {
    let prefix = [tag.len() as u8];
    if output_len == 64 {
        Blake2b512::new()
            .chain_update(prefix)
            .chain_update(tag.as_bytes())
            .chain_update(data)
            .finalize()
            .to_vec()
    } else {
        Blake2b::<U32>::new()
            .chain_update(prefix)
            .chain_update(tag.as_bytes())
            .chain_update(data)
            .finalize()
            .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_output_lengths_match_apply() {
        let stages = [
            Stage::Blake512,
            Stage::Groestl256,
            Stage::Jh512,
            Stage::Skein256,
            Stage::Shabal512,
            Stage::Whirlpool512,
            Stage::Keccak512,
            Stage::Keccak256,
            Stage::Sha1,
            Stage::Sha512,
            Stage::Haval256,
            Stage::Lyra2 {
                time_cost: 1,
                rows: 4,
                cols: 4,
            },
        ];
        for stage in stages {
            assert_eq!(stage.apply(b"abc").len(), stage.output_len(), "{}", stage.tag());
        }
    }

    #[test]
    fn test_exact_stages_match_known_vectors() {
        assert_eq!(
            Stage::Keccak256.apply(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470").to_vec()
        );
        assert_eq!(
            Stage::Blake2s256.apply(b""),
            hex!("69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9").to_vec()
        );
        assert_eq!(
            Stage::Sha1.apply(b"abc"),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d").to_vec()
        );
    }

    #[test]
    fn test_sph_family_stages_match_known_vectors() {
        assert_eq!(
            Stage::Groestl256.apply(b""),
            hex!("1a52d11d550039be16107f9c58db9ebcc417f16f736adb2502567119f0083467").to_vec()
        );
        assert_eq!(
            Stage::Jh256.apply(b""),
            hex!("46e64619c18bb0a92a5e87185a47eef83ca747b8fcc8e1412921357e326df434").to_vec()
        );
        assert_eq!(
            Stage::Skein256.apply(b""),
            hex!("c8877087da56e072870daa843f176e9453115929094c3a40c463a196c29bf7ba").to_vec()
        );
        assert_eq!(
            Stage::Skein512.apply(b""),
            hex!(
                "bc5b4c50925519c290cc634277ae3d6257212395cba733bbad37a4af0fa06af4"
                "1fca7903d06564fea7a2d3730dbdb80c1f85562dfcc070334ea4d1d9e72cba7a"
            )
            .to_vec()
        );
        assert_eq!(
            Stage::Groestl512.apply(b""),
            hex!(
                "6d3ad29d279110eef3adbd66de2a0345a77baede1557f5d099fce0c03d6dc2ba"
                "8e6d4a6633dfbd66053c20faa87d1a11f39a7fbe4a6c2f009801370308fc4ad8"
            )
            .to_vec()
        );
        assert_eq!(
            Stage::Jh512.apply(b""),
            hex!(
                "90ecf2f76f9d2c8017d979ad5ab96b87d58fc8fc4b83060f3f900774faa2c8fa"
                "be69c5f4ff1ec2b61d6b316941cedee117fb04b1f4c5bc1b919ae841c50eec4f"
            )
            .to_vec()
        );
        assert_eq!(
            Stage::Shabal512.apply(b"abc"),
            hex!(
                "4a7f0f707c1b0c1d12ddcfa8aa0f9d2410dd9bab57c2d56705fc1acb02066f99"
                "678738cedb20a2aba94842a441e77bc02656fe5690f98b421d029bfc4df09f91"
            )
            .to_vec()
        );
        assert_eq!(
            Stage::Whirlpool512.apply(b"abc"),
            hex!(
                "4e2448a4c6f486bb16b6562c73b4020bf3043e3a731bce721ae1b303d97e6d4c"
                "7181eebdb6c57e277d0e34957114cbd6c797fc9d95d8b582d225292076d4eef5"
            )
            .to_vec()
        );
        assert!(Stage::Whirlpool512.is_exact());
    }

    #[test]
    fn test_stand_ins_are_domain_separated() {
        let a = Stage::Bmw512.apply(b"header");
        let b = Stage::Luffa512.apply(b"header");
        let c = Stage::Echo512.apply(b"header");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert!(!Stage::Bmw512.is_exact());
    }
}
