use polyline_codec::{Coordinate, decode, encode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let route = [
        Coordinate::new(38.5, -120.2),
        Coordinate::new(40.7, -120.95),
        Coordinate::new(43.252, -126.453),
    ];

    let encoded = encode(&route);
    let restored: Vec<Coordinate> = decode(&encoded)?.collect();
    assert_eq!(restored.len(), route.len());

    println!(
        "encoded {} points -> {} chars: {encoded}",
        route.len(),
        encoded.len()
    );
    for p in &restored {
        println!("  {p}");
    }

    Ok(())
}
