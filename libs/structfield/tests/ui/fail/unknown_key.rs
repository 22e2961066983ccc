use structfield::Record;

#[derive(Record)]
struct User {
    #[structfield(name = "id")]
    id: String,
}

fn main() {}
