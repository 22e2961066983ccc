use structfield::Record;

#[derive(Record)]
enum Shape {
    Circle,
}

fn main() {}
