use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Side of the facility/location partition an index belongs to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FacilityGroup {
    Lower,
    Upper,
}

/// Splits indices `[0, size)` at `cut`. The same split applies to facilities
/// and locations, so facility `i` may only sit at location `m` when both fall
/// in the same group.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GroupPartition {
    cut: usize,
    size: usize,
}

impl GroupPartition {
    pub fn new(cut: usize, size: usize) -> Result<Self, ValidationError> {
        if cut == 0 || cut >= size {
            return Err(ValidationError::GroupCutOutOfRange { cut, size });
        }
        Ok(Self { cut, size })
    }

    pub fn cut(&self) -> usize {
        self.cut
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn group_of(&self, index: usize) -> FacilityGroup {
        if index < self.cut {
            FacilityGroup::Lower
        } else {
            FacilityGroup::Upper
        }
    }

    pub fn allows(&self, facility: usize, location: usize) -> bool {
        self.group_of(facility) == self.group_of(location)
    }

    /// QUBO variable indices `facility * size + location` that pair opposite groups.
    pub fn forbidden_variables(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.size;
        (0..n).flat_map(move |i| {
            (0..n)
                .filter(move |&m| !self.allows(i, m))
                .map(move |m| i * n + m)
        })
    }
}
