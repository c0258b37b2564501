//! Fixture generation demonstration
//!
//! Builds a small domain model, fills it with random data and shows the
//! knobs: length hints, field configuration, custom generators and stubs.

use populate::*;
use std::collections::HashMap;
use url::Url;

#[derive(Populate, Debug, Clone, Default)]
struct Author {
    id: u64,
    #[populate(max_length = 24)]
    name: String,
    homepage: Option<Url>,
    books: Vec<Book>,
}

#[derive(Populate, Debug, Clone, Default)]
struct Book {
    #[populate(max_length = 40)]
    title: String,
    genre: Option<Genre>,
    ratings: HashMap<String, u8>,
    author: Option<Box<Author>>,
}

#[derive(Populate, Debug, Clone, Copy, PartialEq, Eq)]
enum Genre {
    Fiction,
    Poetry,
    Science,
}

#[stub]
trait Library {
    fn name(&self) -> String;
    fn opened(&self) -> chrono::NaiveDate;
}

fn main() -> Result<()> {
    println!("=== Fixture Generation Demonstration ===\n");

    let populator = Populator::new();
    populator.reseed(2024);

    // Example 1: a cyclic model, cut at the depth ceiling
    let author: Author = populator.new_instance()?;
    println!("1. Author {:?} with {} books", author.name, author.books.len());
    if let Some(homepage) = &author.homepage {
        println!("   homepage: {homepage}");
    }

    // Example 2: a length hint on a top-level request
    let short = populator.new_instance_with_length::<String>(Length(5))?;
    println!("2. Short string: {short:?}");

    // Example 3: restrict population to configured fields
    populator.configure_xml(
        r#"<test-data>
             <class name="fixtures::Book">
               <field name="title" length="10"/>
             </class>
           </test-data>"#,
    )?;
    let book: Book = populator.new_instance()?;
    println!("3. Configured book: {book:?}");
    populator.clear_configuration();

    // Example 4: an interface answered by a stub
    let library: LibraryStub = populator.stub();
    println!("4. {library}: {} since {}", library.name(), library.opened());

    Ok(())
}
