use crate::block::ConfigBlock;

/// First line of every generated file.
pub const HEADER: &str = "# Generated by invssh from inventory data, manual edits will be overwritten";

/// Renders all blocks into the final config text.
///
/// Output depends only on the blocks and their order, so rendering the same
/// input twice gives byte-identical text.
pub fn render(blocks: &[ConfigBlock]) -> String {
    let mut out = String::with_capacity(blocks.len() * 256 + HEADER.len() + 1);
    out.push_str(HEADER);
    out.push('\n');

    for block in blocks {
        out.push('\n');
        out.push_str(&block.to_string());
    }

    out
}
