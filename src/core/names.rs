//! Display-name allocation for newly registered sources.
//!
//! Imported sources get human-friendly names drawn from a fixed ordered pool
//! of mineral names. A pivot cursor keeps allocation deterministic across a
//! sequence of insertions: each scan resumes after the last consumed
//! candidate instead of re-testing it, so a given insertion order always
//! produces the same names.

use thiserror::Error;

/// Built-in candidate pool, in allocation order.
pub const DEFAULT_NAME_POOL: [&str; 10] = [
    "Amethyst",
    "Chrysocolla",
    "Emerald",
    "Hematite",
    "Jade",
    "Lazurite",
    "Malachite",
    "Obsidian",
    "Quartz",
    "Turquoise",
];

/// Ceiling on the total number of named sources the allocator will serve.
///
/// Suffixed overflow names (`Amethyst2`, ...) are only handed out up to this
/// total, so one oversized import cannot flood the registry.
pub const DEFAULT_MAX_SOURCES: usize = DEFAULT_NAME_POOL.len() + 1;

/// Allocation failure: the pool plus its bounded overflow is used up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("name pool exhausted ({cap} sources already named)")]
pub struct PoolExhausted {
    /// Maximum total number of named sources.
    pub cap: usize,
}

/// A successful allocation: the name to insert and the pivot to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub name: String,
    pub next_pivot: usize,
}

/// Allocates display names from an ordered candidate pool.
///
/// The allocator itself never inserts anything; the caller is responsible
/// for adding the returned name to the registry.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    pool: Vec<String>,
    cap: usize,
}

impl NameAllocator {
    /// Create an allocator over a custom pool.
    ///
    /// The total-size cap defaults to one past the pool size, matching the
    /// built-in pool's behavior.
    pub fn new<I, S>(pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool: Vec<String> = pool.into_iter().map(Into::into).collect();
        let cap = pool.len() + 1;
        NameAllocator { pool, cap }
    }

    /// Override the total-size cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Number of candidates in the pool.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Maximum total number of named sources.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Produce the next unused name.
    ///
    /// `pivot` is the cursor into the pool; `registered` is the current
    /// registry size, checked against the cap before anything is scanned;
    /// `taken` reports whether a candidate already exists as a registry key.
    pub fn next<F>(
        &self,
        pivot: usize,
        registered: usize,
        taken: F,
    ) -> Result<Allocation, PoolExhausted>
    where
        F: Fn(&str) -> bool,
    {
        if registered >= self.cap {
            return Err(PoolExhausted { cap: self.cap });
        }

        for (idx, candidate) in self.pool.iter().enumerate().skip(pivot) {
            if !taken(candidate) {
                return Ok(Allocation {
                    name: candidate.clone(),
                    next_pivot: idx + 1,
                });
            }
        }

        // Pool consumed: compose suffixed names, first free one wins. The cap
        // check above guarantees fewer than `cap` names exist, so some
        // composed name is free and this terminates.
        let mut suffix: u32 = 2;
        loop {
            for candidate in &self.pool {
                let composed = format!("{candidate}{suffix}");
                if !taken(&composed) {
                    return Ok(Allocation {
                        name: composed,
                        next_pivot: self.pool.len(),
                    });
                }
            }
            suffix += 1;
        }
    }
}

impl Default for NameAllocator {
    fn default() -> Self {
        NameAllocator::new(DEFAULT_NAME_POOL)
    }
}
