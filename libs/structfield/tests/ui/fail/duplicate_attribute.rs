use structfield::Record;

#[derive(Record)]
struct User {
    #[structfield("id")]
    #[structfield("user_id")]
    id: String,
}

fn main() {}
