use structfield::Record;

#[derive(Record)]
struct Pair(String, String);

fn main() {}
