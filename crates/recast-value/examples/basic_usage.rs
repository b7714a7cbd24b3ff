//! Decode a handful of loosely-typed inputs the way a row mapper would.

use recast_value::prelude::*;
use recast_value::decode_as;

fn main() -> Result<(), ValueError> {
    tracing_subscriber::fmt().init();

    // a numeric column arriving as text
    let age = decode_value(
        &TargetInfo::new(TargetType::scalar(TargetKind::Integer)),
        &Value::text("42"),
    )?;
    println!("age = {age}");

    // a tag list stored as one delimited string
    let tags = TargetInfo::new(TargetType::list_of(TargetType::scalar(TargetKind::String)))
        .with_hints(Hints::new().with_separators(';', ':'));
    let decoded = decode_value(&tags, &Value::text("red; green; blue"))?;
    println!("tags = {decoded}");

    // straight to a typed vector
    let scores: Option<Vec<i32>> = decode_as(&Value::text("10,20,30"))?;
    println!("scores = {scores:?}");

    // and back out to a string with a format hint
    let price = Value::float(12345.6789);
    let rendered = encode_value(&price, &Hints::new().with_number_pattern("0,000.00"));
    println!("price = {rendered:?}");

    Ok(())
}
