use super::*;

#[test]
fn note_error_to_status_maps_not_found() {
    let err = NoteError::NotFound(Uuid::nil());
    assert_eq!(note_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn note_error_to_status_maps_database() {
    let err = NoteError::Database(sqlx::Error::RowNotFound);
    assert_eq!(note_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}
