/// Byte offset of the first occurrence of `needle` at or after `from`.
pub fn find_literal(content: &str, needle: &str, from: usize) -> Option<usize> {
    content.get(from..)?.find(needle).map(|idx| from + idx)
}

/// Byte offset just past the first occurrence of `needle`.
pub fn find_end_of(content: &str, needle: &str) -> Option<usize> {
    find_literal(content, needle, 0).map(|idx| idx + needle.len())
}

/// Byte offset of the first occurrence of `line` at or after `from` that
/// spans a whole line: it starts the file or follows a `\n`, and it ends the
/// file or is followed by `\n` or `\r\n`.
pub fn find_line(content: &str, line: &str, from: usize) -> Option<usize> {
    if line.is_empty() {
        return None;
    }

    let tail = content.get(from..)?;
    tail.match_indices(line)
        .map(|(idx, _)| from + idx)
        .find(|&start| {
            let end = start + line.len();
            let starts_line = start == 0 || content.as_bytes()[start - 1] == b'\n';
            let rest = &content[end..];
            let ends_line = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");
            starts_line && ends_line
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_literal_from_offset() {
        let src = "abc abc";
        assert_eq!(find_literal(src, "abc", 0), Some(0));
        assert_eq!(find_literal(src, "abc", 1), Some(4));
        assert_eq!(find_literal(src, "abc", 5), None);
        assert_eq!(find_literal(src, "abc", 100), None);
    }

    #[test]
    fn test_find_end_of() {
        assert_eq!(find_end_of("x = {\n}", "x = {"), Some(5));
        assert_eq!(find_end_of("x = [\n]", "x = {"), None);
    }

    #[test]
    fn test_find_line_requires_whole_line() {
        let src = "class A:\n    arch = LLAMA4\n    arch = LLAMA\n";
        assert_eq!(find_line(src, "    arch = LLAMA", 0), Some(27));

        let indented = "        arch = LLAMA\n";
        assert_eq!(find_line(indented, "    arch = LLAMA", 0), None);
    }

    #[test]
    fn test_find_line_crlf_and_eof() {
        assert_eq!(find_line("a\r\nb\r\n", "b", 0), Some(3));
        assert_eq!(find_line("a\nb", "b", 0), Some(2));
        assert_eq!(find_line("b", "b", 0), Some(0));
    }

    #[test]
    fn test_find_line_respects_start() {
        let src = "x\nclass B:\nx\n";
        assert_eq!(find_line(src, "x", 0), Some(0));
        assert_eq!(find_line(src, "x", 2), Some(11));
        assert_eq!(find_line(src, "", 0), None);
    }
}
