//! LZW encoder producing sub-block streams in the decoder's dialect.

use crate::config::{LzwConfig, MAX_CODE_WIDTH, MAX_TABLE_SIZE, widening_code};
use crate::error::{LzwError, Result};
use std::collections::HashMap;
use timebox_core::BitWriter;

/// LZW encoder for one sub-block of color indices.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Code size and color table size of the target image block.
    config: LzwConfig,
    /// Code width reached at the end of the last encode.
    code_width: u8,
}

/// Bit writer that applies the value-triggered width growth.
struct CodeWriter {
    writer: BitWriter,
    width: u8,
}

impl CodeWriter {
    fn emit(&mut self, code: u16) -> Result<()> {
        self.writer.write_bits(code, self.width)?;
        if code == widening_code(self.width) && self.width < MAX_CODE_WIDTH {
            self.width += 1;
        }
        Ok(())
    }
}

impl LzwEncoder {
    /// Create a new encoder.
    ///
    /// Every literal must sit below the clear code, otherwise the decoder
    /// would read the leading clear code as a literal.
    pub fn new(config: LzwConfig) -> Result<Self> {
        if !config.literals_below_clear_code() {
            return Err(LzwError::InvalidTableSize(config.color_table_size));
        }
        Ok(Self {
            config,
            code_width: config.initial_code_width(),
        })
    }

    /// Encode color indices as one self-contained sub-block stream.
    ///
    /// # Algorithm
    ///
    /// 1. Write the clear code
    /// 2. Extend the current match while the longer string is in the table
    ///    and its code fits in the current width
    /// 3. Otherwise write the match's code and allocate one table key for
    ///    match + next index, exactly as the decoder will one step later
    /// 4. Write the final match and the end-of-information code
    pub fn encode(&mut self, indices: &[u8]) -> Result<Vec<u8>> {
        let mut out = CodeWriter {
            writer: BitWriter::new(),
            width: self.config.initial_code_width(),
        };

        out.emit(self.config.clear_code())?;

        let Some((&first, rest)) = indices.split_first() else {
            out.emit(self.config.eoi_code())?;
            self.code_width = out.width;
            return Ok(out.writer.into_vec());
        };

        let mut table: HashMap<Vec<u8>, u16> = (0..self.config.color_table_size)
            .map(|c| (vec![c as u8], c))
            .collect();
        let mut next_code = usize::from(self.config.first_code());

        self.check_index(first)?;
        let mut current = vec![first];
        let mut current_code = u16::from(first);

        for &index in rest {
            self.check_index(index)?;

            let mut candidate = current.clone();
            candidate.push(index);

            match table.get(&candidate) {
                Some(&code) if u32::from(code) < (1u32 << out.width) => {
                    current = candidate;
                    current_code = code;
                }
                _ => {
                    out.emit(current_code)?;

                    // The decoder allocates a key even for a string it already
                    // knows, so the key is consumed either way.
                    if next_code < MAX_TABLE_SIZE {
                        table.entry(candidate).or_insert(next_code as u16);
                        next_code += 1;
                    }

                    current = vec![index];
                    current_code = u16::from(index);
                }
            }
        }

        out.emit(current_code)?;
        out.emit(self.config.eoi_code())?;

        self.code_width = out.width;
        Ok(out.writer.into_vec())
    }

    fn check_index(&self, index: u8) -> Result<()> {
        if u16::from(index) >= self.config.color_table_size {
            return Err(LzwError::IndexOutOfRange {
                index,
                table_size: self.config.color_table_size,
            });
        }
        Ok(())
    }

    /// Code width reached by the last encode.
    pub fn code_width(&self) -> u8 {
        self.code_width
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
