//! Gemeinsame Text-Helfer der Codecs.

/// Zeilen mit 1-basierter Nummer; `\r\n` wird toleriert.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(i, line)| (i + 1, line))
}

/// Formatiert eine Zahl mit 2 Nachkommastellen, ohne `-0.00`.
pub(crate) fn format_number(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Parst ein Zahlenfeld mit Zeilenbezug für die Fehlermeldung.
pub(crate) fn parse_number(field: &str, line: usize, what: &str) -> Result<f64, super::ImportError> {
    field.trim().parse::<f64>().map_err(|_| {
        super::ImportError::malformed(line, format!("{what} '{}' ist keine Zahl", field.trim()))
    })
}
