//! Entry log: the ordered blocks generated so far.
//!
//! Append-only apart from a full clear. Insertion order is the order blocks
//! are written to a saved file.

use crate::template::ShineBlock;

/// Separator written after each block in the output buffer.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    blocks: Vec<ShineBlock>,
}

impl EntryLog {
    pub fn append(&mut self, block: ShineBlock) {
        self.blocks.push(block);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[ShineBlock] {
        &self.blocks
    }

    /// Clearing more than one entry needs the user's confirmation.
    pub fn needs_clear_confirmation(&self) -> bool {
        self.blocks.len() > 1
    }

    /// Text the output buffer holds when it has not been edited by hand:
    /// every block followed by a blank line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(block.as_str());
            out.push_str(BLOCK_SEPARATOR);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use shm_core::config::Layout;

    use super::*;
    use crate::fields::{FieldId, FieldStore};
    use crate::template;

    fn block(name: &str) -> ShineBlock {
        let mut store = FieldStore::default();
        store.set(FieldId::Name, name);
        template::render(&store.snapshot(), Layout::Classic)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = EntryLog::default();
        for name in ["a", "b", "c"] {
            log.append(block(name));
        }

        assert_eq!(log.count(), 3);
        for (name, b) in ["a", "b", "c"].iter().zip(log.blocks()) {
            assert!(b.as_str().contains(&format!("\"{name}_shine\"")));
        }

        let text = log.text();
        let a = text.find("\"a_shine\"").unwrap();
        let b = text.find("\"b_shine\"").unwrap();
        let c = text.find("\"c_shine\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_text_separates_blocks_with_blank_line() {
        let mut log = EntryLog::default();
        log.append(block("a"));
        log.append(block("b"));

        let expected = format!("{}\n\n{}\n\n", block("a"), block("b"));
        assert_eq!(log.text(), expected);
    }

    #[test]
    fn test_clear_confirmation_threshold() {
        let mut log = EntryLog::default();
        assert!(!log.needs_clear_confirmation());
        log.append(block("a"));
        assert!(!log.needs_clear_confirmation());
        log.append(block("b"));
        assert!(log.needs_clear_confirmation());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.text(), "");
    }
}
