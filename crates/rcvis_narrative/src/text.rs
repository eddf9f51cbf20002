//! Wording helpers shared by the FAQ rules.

/// Joins names the way they are read aloud.
///
/// ```
/// use rcvis_narrative::comma_separated_names_with_and;
///
/// assert_eq!(comma_separated_names_with_and(&["A"]), "A");
/// assert_eq!(comma_separated_names_with_and(&["A", "B"]), "A and B");
/// assert_eq!(comma_separated_names_with_and(&["A", "B", "C"]), "A, B, and C");
/// ```
pub fn comma_separated_names_with_and<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let head = rest.iter().map(|n| n.as_ref()).collect::<Vec<_>>().join(", ");
            format!("{}, and {}", head, last.as_ref())
        }
    }
}

/// Renders a vote count, hedging when it is fractional.
///
/// ```
/// use rcvis_narrative::intify_or_aboutify;
///
/// assert_eq!(intify_or_aboutify(12.0), "12");
/// assert_eq!(intify_or_aboutify(11.6), "about 12");
/// assert_eq!(intify_or_aboutify(3.2), "about 3");
/// ```
pub fn intify_or_aboutify(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("about {}", value.round() as i64)
    }
}

/// Renders a vote count exactly, dropping a zero fraction.
///
/// ```
/// use rcvis_narrative::format_votes;
///
/// assert_eq!(format_votes(250.0), "250");
/// assert_eq!(format_votes(250.5), "250.5");
/// ```
pub fn format_votes(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
