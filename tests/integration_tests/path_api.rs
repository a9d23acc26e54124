use itertools::Itertools;
use pathsplit::path::{parse_path, rewrite_fragment, split_path, CommandType, Decimal, Split};
use pathsplit::PathError;

#[test]
fn test_parse_path_commands() {
    let kinds = parse_path("M1,1 2,2 h3 v4 c1,1 2,2 3,3 s1,1 2,2 q1,1 2,2 t1,1 a1,1 0 0 1 2,2 z")
        .map_ok(|cmd| cmd.kind())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        kinds,
        [
            CommandType::Move,
            CommandType::Line,
            CommandType::HorizontalLine,
            CommandType::VerticalLine,
            CommandType::Curve,
            CommandType::SmoothCurve,
            CommandType::QuadraticCurve,
            CommandType::SmoothQuadraticCurve,
            CommandType::Arc,
            CommandType::Close,
        ]
    );
}

#[test]
fn test_parse_path_stops_at_error() {
    let results = parse_path("M1,1 L2,2 L3 M4,4").collect_vec();
    assert_eq!(results.len(), 3);
    assert_eq!(results[2], Err(PathError::MissingArgs));
}

#[test]
fn test_split_path_points() {
    let splits: Vec<Split> = split_path("M0,0h1zh1zm1,1h1")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        splits,
        [
            Split::new(7, 7, "M0,0"),
            Split::new(10, 14, "M1,1"),
        ]
    );
}

#[test]
fn test_rewrite_fragment() {
    let rewritten = rewrite_fragment("<path d=\"", "M0,0h1zM5,5h1z", "\"/>").unwrap();
    assert_eq!(
        rewritten.as_deref(),
        Some("<path d=\"M0,0h1z\"/>\n<path d=\"M5,5h1z\"/>")
    );
    assert_eq!(rewrite_fragment("", "M0,0h1z", ""), Ok(None));
    assert_eq!(rewrite_fragment("", "", ""), Ok(None));
    assert_eq!(rewrite_fragment("", "M0,0h1zz1", ""), Err(PathError::MissingCommand));
}

#[test]
fn test_decimal_sum() {
    let sum = ["0.1", "0.2", "-1e1", "5E-1"]
        .iter()
        .map(|s| s.parse::<Decimal>().unwrap())
        .fold(Decimal::default(), |acc, d| acc + d);
    assert_eq!(sum.to_string(), "-9.2");
    assert!(sum.is_negative());
}
