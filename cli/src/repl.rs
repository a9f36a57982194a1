use std::io::{BufRead, Write};

/// Prompt and read one line from stdin. `None` means stdin reached end of
/// input.
pub fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "$ ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    read_line_from(&mut std::io::stdin().lock())
}

fn read_line_from(reader: &mut impl BufRead) -> Result<Option<String>, String> {
    let mut buffer = String::new();
    let read = reader.read_line(&mut buffer).map_err(|e| e.to_string())?;
    Ok((read > 0).then_some(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn end_of_input_is_none() {
        let mut input = Cursor::new("config\n\n");
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("config\n"));
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("\n"));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }

    #[test]
    fn last_line_without_newline_is_returned() {
        let mut input = Cursor::new("exit");
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }
}
