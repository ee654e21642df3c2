//! Built-in sample dataset used by [`super::StaticSource`].

use crate::book::{Book, BookId, Category};

fn book(
    id: u64,
    title: &str,
    author: &str,
    year: &str,
    category: Category,
    description: &str,
) -> Book {
    Book {
        id: BookId::Index(id),
        title: title.to_string(),
        author: author.to_string(),
        year: year.to_string(),
        category,
        description: description.to_string(),
        thumbnail: None,
    }
}

/// The sample catalog.
pub fn sample_books() -> Vec<Book> {
    vec![
        book(
            1,
            "Cien años de soledad",
            "Gabriel García Márquez",
            "1967",
            Category::Fiction,
            "La saga de la familia Buendía a lo largo de siete generaciones en Macondo.",
        ),
        book(
            2,
            "El Señor de los Anillos",
            "J. R. R. Tolkien",
            "1954",
            Category::Fantasy,
            "Frodo emprende el viaje para destruir el Anillo Único en el Monte del Destino.",
        ),
        book(
            3,
            "Breve historia del tiempo",
            "Stephen Hawking",
            "1988",
            Category::Science,
            "Del big bang a los agujeros negros, una introducción a la cosmología moderna.",
        ),
        book(
            4,
            "Sapiens: De animales a dioses",
            "Yuval Noah Harari",
            "2011",
            Category::History,
            "Un recorrido por la evolución de la humanidad desde la Edad de Piedra.",
        ),
        book(
            5,
            "Don Quijote de la Mancha",
            "Miguel de Cervantes",
            "1605",
            Category::Fiction,
            "Un hidalgo enloquecido por los libros de caballerías sale a desfacer entuertos.",
        ),
        book(
            6,
            "El origen de las especies",
            "Charles Darwin",
            "1859",
            Category::Science,
            "La obra que presentó la teoría de la evolución por selección natural.",
        ),
        book(
            7,
            "Harry Potter y la piedra filosofal",
            "J. K. Rowling",
            "1997",
            Category::Fantasy,
            "Un niño descubre en su undécimo cumpleaños que es un mago.",
        ),
        book(
            8,
            "SPQR: Una historia de la antigua Roma",
            "Mary Beard",
            "2015",
            Category::History,
            "Mil años de historia romana, desde la fundación de la ciudad hasta Caracalla.",
        ),
        book(
            9,
            "Cosmos",
            "Carl Sagan",
            "1980",
            Category::Science,
            "Un viaje por el universo y por la historia de la ciencia.",
        ),
        book(
            10,
            "El principito",
            "Antoine de Saint-Exupéry",
            "1943",
            Category::Others,
            "Un piloto perdido en el desierto conoce a un pequeño príncipe de otro planeta.",
        ),
    ]
}
