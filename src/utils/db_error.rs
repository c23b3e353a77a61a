use sqlx::error::DatabaseError;

/// Name of the uniqueness constraint on `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

pub fn is_unique_violation_on_code(db_err: &dyn DatabaseError) -> bool {
    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}
