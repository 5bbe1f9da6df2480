//! Tool log cleanup
//!
//! Blender's headless output arrives with carriage returns and tab
//! indentation that read poorly when re-streamed through another terminal.

/// Tidy one line of tool output: trim trailing newline characters and
/// expand tabs to spaces.
pub fn format_tool_log(line: &str) -> String {
    line.trim_end_matches(['\n', '\r']).replace('\t', "   ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_line_endings() {
        assert_eq!(format_tool_log("Fra:1 Mem:12.5M\r\n"), "Fra:1 Mem:12.5M");
        assert_eq!(format_tool_log("plain"), "plain");
    }

    #[test]
    fn expands_tabs() {
        assert_eq!(format_tool_log("\tnested"), "   nested");
    }

    #[test]
    fn empty_line_stays_empty() {
        assert_eq!(format_tool_log("\n"), "");
    }
}
