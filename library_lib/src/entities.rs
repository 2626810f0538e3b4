//! Stored entities and their mapping into client representations.

use library_api::types::{
    AuthorDto, AuthorForCreation, AuthorID, BookDto, BookForCreation, BookForUpdate, BookID,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorID,
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: BookID,
    pub title: String,
    pub description: Option<String>,
    pub author_id: AuthorID,
}

impl Author {
    pub fn from_creation(id: AuthorID, input: &AuthorForCreation) -> Self {
        Self {
            id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            genre: input.genre.clone(),
        }
    }
}

impl Book {
    /// Builds a book from a creation body. A nil id asks the repository to assign one.
    pub fn from_creation(id: BookID, author_id: AuthorID, input: &BookForCreation) -> Self {
        Self {
            id,
            title: input.title.clone().unwrap_or_default(),
            description: input.description.clone(),
            author_id,
        }
    }

    pub fn from_update(id: BookID, author_id: AuthorID, input: &BookForUpdate) -> Self {
        Self {
            id,
            title: input.title.clone().unwrap_or_default(),
            description: input.description.clone(),
            author_id,
        }
    }

    /// Overwrites the client-editable fields.
    pub fn apply_update(&mut self, input: &BookForUpdate) {
        self.title = input.title.clone().unwrap_or_default();
        self.description = input.description.clone();
    }

    /// The editable view a JSON Patch document is applied to.
    pub fn to_update(&self) -> BookForUpdate {
        BookForUpdate {
            title: Some(self.title.clone()),
            description: self.description.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        AuthorDto {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            genre: author.genre.clone(),
        }
    }
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        AuthorDto {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            genre: author.genre,
        }
    }
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        BookDto {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            author_id: book.author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn author_maps_to_dto() {
        let author = Author {
            id: Uuid::from_u128(7),
            first_name: "Douglas".to_string(),
            last_name: "Adams".to_string(),
            genre: "Science Fiction".to_string(),
        };
        let dto = AuthorDto::from(&author);
        assert_eq!(dto.id, author.id);
        assert_eq!(dto.first_name, "Douglas");
        assert_eq!(dto.genre, "Science Fiction");
        assert_eq!(AuthorDto::from(author), dto);
    }

    #[test]
    fn book_update_round_trip() {
        let mut book = Book {
            id: Uuid::from_u128(1),
            title: "Old".to_string(),
            description: None,
            author_id: Uuid::from_u128(2),
        };
        let update = BookForUpdate {
            title: Some("New".to_string()),
            description: Some("Desc".to_string()),
        };
        book.apply_update(&update);
        assert_eq!(book.to_update(), update);
        assert_eq!(BookDto::from(&book).author_id, Uuid::from_u128(2));
    }
}
