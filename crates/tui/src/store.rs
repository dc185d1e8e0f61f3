use std::fs;

use engine::Book;

use crate::error::Result;

/// Reads the expense book from disk. A missing file yields an empty book
/// so a fresh checkout starts cleanly; malformed JSON is a hard error
/// because silently showing half a book would be worse than refusing.
pub fn load_book(path: &str) -> Result<Book> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("book file \"{path}\" not found, starting empty");
            return Ok(Book::default());
        }
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// One human-readable line per group that fails validation. The book is
/// still shown; these only feed warnings.
pub fn validation_notices(book: &Book) -> Vec<String> {
    book.groups
        .iter()
        .filter_map(|group| {
            group
                .validate()
                .err()
                .map(|err| format!("{}: {err}", group.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_an_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");

        let book = load_book(path.to_str().unwrap()).unwrap();

        assert!(book.groups.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load_book(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn notices_name_the_broken_group() {
        let json = r#"{
            "groups": [{
                "id": "g1",
                "name": "Flatmates",
                "kind": "group",
                "currency": "EUR",
                "participants": [
                    {"id": "p1", "name": "Ada"},
                    {"id": "p1", "name": "Ada again"}
                ]
            }]
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();

        let notices = validation_notices(&book);

        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Flatmates:"));
    }
}
