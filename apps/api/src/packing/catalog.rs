//! Package Size Catalog — the validated, canonical set of package sizes.
//!
//! Sizes are kept distinct and sorted largest first. The solver walks them in
//! that order, which is what makes its tie-breaking deterministic.

use crate::packing::error::PackingError;

/// Immutable, non-empty collection of distinct positive package sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCatalog {
    sizes: Vec<usize>,
}

impl PackageCatalog {
    /// Validates and canonicalizes `sizes`.
    ///
    /// Fails with `InvalidConfiguration` if the list is empty or any size is
    /// `<= 0`. Duplicates are collapsed rather than rejected.
    pub fn new<I>(sizes: I) -> Result<Self, PackingError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut canonical = Vec::new();
        for size in sizes {
            if size <= 0 {
                return Err(PackingError::InvalidConfiguration(format!(
                    "package sizes must be positive, got {size}"
                )));
            }
            let size = usize::try_from(size).map_err(|_| {
                PackingError::InvalidConfiguration(format!(
                    "package size {size} does not fit in memory"
                ))
            })?;
            canonical.push(size);
        }

        if canonical.is_empty() {
            return Err(PackingError::InvalidConfiguration(
                "package sizes cannot be empty".to_string(),
            ));
        }

        canonical.sort_unstable_by(|a, b| b.cmp(a));
        canonical.dedup();

        Ok(Self { sizes: canonical })
    }

    /// Sizes in descending order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sizes.iter().copied()
    }

    /// Largest package size. The catalog is never empty.
    pub fn max_size(&self) -> usize {
        self.sizes[0]
    }
}
