mod meta;
pub use self::meta::{PaginationMetadata, Paging, PAGINATION_HEADER};

mod link;
pub use self::link::{Link, Method};

mod author;
pub use self::author::{AuthorDto, AuthorForCreation, AuthorID};

mod book;
pub use self::book::{BookDto, BookForCreation, BookForUpdate, BookID};
