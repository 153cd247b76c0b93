use std::{hash::{BuildHasher, Hash, Hasher}, collections::HashMap};

use fxhash::FxHasher64;


/// Map keyed by state fingerprints. The keys are already well-mixed hashes,
/// so they are stored as-is instead of being hashed a second time.
pub type FingerprintMap<T> = HashMap<u64, T, BuildFingerprintHasher>;


pub struct FingerprintHasher {
    pub state: u64,
}

impl Hasher for FingerprintHasher {
    fn finish(&self) -> u64 {
        return self.state;
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = self.state.rotate_left(8) ^ *byte as u64;
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.state = i;
    }
}

#[derive(Clone, Default)]
pub struct BuildFingerprintHasher;

impl BuildHasher for BuildFingerprintHasher {
    type Hasher = FingerprintHasher;
    fn build_hasher(&self) -> Self::Hasher {
        return FingerprintHasher { state: 0 }
    }
}


pub fn fingerprint_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher64::default();
    value.hash(&mut hasher);
    return hasher.finish();
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_map_keys_pass_through() {
        let mut hasher = BuildFingerprintHasher.build_hasher();
        hasher.write_u64(0xdead_beef);
        assert_eq!(hasher.finish(), 0xdead_beef);

        let mut map: FingerprintMap<f32> = Default::default();
        map.insert(42, 1.5);
        assert_eq!(map.get(&42), Some(&1.5));
    }

    #[test]
    fn fingerprints_depend_on_every_field() {
        let pits = vec![4u32, 4, 0, 4];
        assert_eq!(fingerprint_of(&(&pits, 1u8)), fingerprint_of(&(&pits, 1u8)));
        assert_ne!(fingerprint_of(&(&pits, 1u8)), fingerprint_of(&(&pits, 2u8)));
    }
}
