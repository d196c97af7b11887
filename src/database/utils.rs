/// Collapse the whitespace of a SQL statement onto one line for logging.
pub fn sql(query: &str) -> String {
    query.split_whitespace().collect::<Vec<&str>>().join(" ")
}
