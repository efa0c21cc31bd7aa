/// Returns true when `e` is a unique-constraint failure on `url.alias`.
///
/// SQLite does not report constraint names, so the check matches the
/// `table.column` pair in the engine's message.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("url.alias")
}
