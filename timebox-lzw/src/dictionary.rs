//! LZW code table management.

use crate::config::{LzwConfig, MAX_TABLE_SIZE};
use crate::error::{LzwError, Result};

/// One slot of the code table.
///
/// Sentinels are stored as their own variants so that "is this the clear
/// code" is answered by the stored value rather than by the key. When a color
/// table is larger than the clear code, the literal seeded at that key wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEntry {
    /// A sequence of color indices.
    Indices(Vec<u8>),
    /// The clear-code marker.
    ClearCode,
    /// The end-of-information marker.
    EndOfInformation,
}

/// LZW code table: code -> sequence of color indices.
///
/// Keys are dense from zero; literal keys that the color table does not
/// cover are left empty.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Slots indexed by code.
    entries: Vec<Option<CodeEntry>>,
    /// Configuration the table was seeded from.
    config: LzwConfig,
}

impl CodeTable {
    /// Create a table seeded for `config`.
    pub fn new(config: LzwConfig) -> Self {
        let mut table = Self {
            entries: Vec::with_capacity(MAX_TABLE_SIZE),
            config,
        };
        table.initialize();
        table
    }

    /// Reset to literal entries plus the two sentinels.
    pub fn initialize(&mut self) {
        let clear = usize::from(self.config.clear_code());
        let eoi = usize::from(self.config.eoi_code());
        let literals = usize::from(self.config.color_table_size);

        self.entries.clear();
        self.entries.resize(literals.max(eoi + 1), None);

        self.entries[clear] = Some(CodeEntry::ClearCode);
        self.entries[eoi] = Some(CodeEntry::EndOfInformation);
        for (index, slot) in self.entries.iter_mut().take(literals).enumerate() {
            *slot = Some(CodeEntry::Indices(vec![index as u8]));
        }
    }

    /// Look up the entry stored under `code`.
    pub fn lookup(&self, code: u16) -> Result<&CodeEntry> {
        self.entries
            .get(usize::from(code))
            .and_then(Option::as_ref)
            .ok_or_else(|| LzwError::InvalidCode {
                code,
                next: self.next_key(),
            })
    }

    /// Look up the index sequence stored under `code`.
    ///
    /// Sentinels have no index sequence and are reported as invalid here.
    pub fn indices(&self, code: u16) -> Result<&[u8]> {
        match self.lookup(code)? {
            CodeEntry::Indices(seq) => Ok(seq),
            CodeEntry::ClearCode | CodeEntry::EndOfInformation => Err(LzwError::InvalidCode {
                code,
                next: self.next_key(),
            }),
        }
    }

    /// Whether `code` has an entry.
    pub fn has(&self, code: u16) -> bool {
        matches!(self.entries.get(usize::from(code)), Some(Some(_)))
    }

    /// Whether `code` holds the clear-code marker.
    pub fn is_clear_code(&self, code: u16) -> bool {
        matches!(
            self.entries.get(usize::from(code)),
            Some(Some(CodeEntry::ClearCode))
        )
    }

    /// Whether `code` holds the end-of-information marker.
    pub fn is_end_of_information(&self, code: u16) -> bool {
        matches!(
            self.entries.get(usize::from(code)),
            Some(Some(CodeEntry::EndOfInformation))
        )
    }

    /// Store `indices` under the key after the current maximum.
    ///
    /// Returns the assigned key, or `None` once the table is full.
    pub fn insert_next(&mut self, indices: Vec<u8>) -> Option<u16> {
        if self.is_full() {
            return None;
        }
        let key = self.next_key();
        self.entries.push(Some(CodeEntry::Indices(indices)));
        Some(key)
    }

    /// The key the next insertion will receive.
    pub fn next_key(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Whether all 12-bit codes are taken.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TABLE_SIZE
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether the table has no entries (never true after initialization).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
