//! Tests for the landscape model and its text format.

use super::*;

const XOR_AND: &str = "\
c two independent blocks
p MK 4
m 0 1
0 1 1 0

m 2 3
2 0 0 2
";

fn xor_and() -> Landscape {
    XOR_AND.parse().unwrap()
}

#[test]
fn test_parse_header_and_subfunctions() {
    let landscape = xor_and();
    assert_eq!(landscape.kind(), ProblemKind::Mk);
    assert_eq!(landscape.length(), 4);
    assert_eq!(landscape.subfunctions().len(), 2);
    assert_eq!(landscape.subfunctions()[1].variables(), &[2, 3]);
    assert_eq!(landscape.subfunctions()[1].values(), &[2, 0, 0, 2]);
}

#[test]
fn test_evaluate_is_big_endian_in_variable_order() {
    let sub = Subfunction::new(vec![2, 0], vec![10, 20, 30, 40]);
    // bit 2 is the high bit, bit 0 the low bit
    assert_eq!(sub.evaluate(&[false, false, false]), 10);
    assert_eq!(sub.evaluate(&[true, false, false]), 20);
    assert_eq!(sub.evaluate(&[false, false, true]), 30);
    assert_eq!(sub.evaluate(&[true, false, true]), 40);
}

#[test]
fn test_fitness_sums_subfunctions() {
    let landscape = xor_and();
    assert_eq!(landscape.fitness(&[false, false, false, false]), 2);
    assert_eq!(landscape.fitness(&[false, true, false, false]), 3);
    assert_eq!(landscape.fitness(&[true, true, true, false]), 0);
    assert_eq!(landscape.evaluate(0, &[true, false, true, true]), 1);
}

#[test]
fn test_extra_header_tokens_and_whitespace() {
    let landscape: Landscape = "  p NK 3 2 extra\n m 0 1 2 \n1 2 3 4 5 6 7 8\n"
        .parse()
        .unwrap();
    assert_eq!(landscape.kind(), ProblemKind::Nk);
    assert_eq!(landscape.length(), 3);
}

#[test]
fn test_integral_decimal_values_accepted() {
    let landscape: Landscape = "p MK 1\nm 0\n1.0 -2.0\n".parse().unwrap();
    assert_eq!(landscape.subfunctions()[0].values(), &[1, -2]);
}

#[test]
fn test_fractional_value_rejected() {
    let err = "p MK 1\nm 0\n1.5 2\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::InvalidNumber { line: 3, .. }));
}

#[test]
fn test_missing_length() {
    let err = "c nothing here\nm 0\n1 2\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::MissingLength));

    let err = "p MK\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::MissingLength));

    let err = "p MK 0\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::MissingLength));
}

#[test]
fn test_unknown_problem() {
    let err = "p SAT 3\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::UnknownProblem { line: 1, .. }));
}

#[test]
fn test_duplicate_problem_line() {
    let err = "p MK 3\np MK 4\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::DuplicateProblem { line: 2 }));
}

#[test]
fn test_wrong_value_count() {
    let err = "p MK 2\nm 0 1\n1 2 3\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(
        err,
        LoadError::ValueCount {
            subfunction: 0,
            expected: 4,
            found: 3
        }
    ));
}

#[test]
fn test_index_out_of_range() {
    let err = "p MK 2\nm 0 2\n1 2 3 4\n".parse::<Landscape>().unwrap_err();
    assert!(matches!(
        err,
        LoadError::IndexOutOfRange {
            subfunction: 0,
            index: 2,
            length: 2
        }
    ));
}

#[test]
fn test_missing_value_line() {
    let err = "p MK 2\nm 0 1".parse::<Landscape>().unwrap_err();
    assert!(matches!(err, LoadError::MissingValues { subfunction: 0 }));
}

#[test]
fn test_unknown_header_is_skipped() {
    let landscape: Landscape = "p MK 1\nx whatever\nm 0\n0 1\n".parse().unwrap();
    assert_eq!(landscape.subfunctions().len(), 1);
}

#[test]
fn test_too_many_variables() {
    let sub = Subfunction::new((0..31).collect(), Vec::new());
    let err = Landscape::new(ProblemKind::Mk, 31, vec![sub]).unwrap_err();
    assert!(matches!(err, LoadError::TooManyVariables { order: 31, .. }));
}

#[test]
fn test_write_then_parse_preserves_landscape() {
    let landscape = xor_and();
    let mut buffer = Vec::new();
    landscape.write_to(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("p MK 4\n"));
    assert_eq!(text.parse::<Landscape>().unwrap(), landscape);
}

#[test]
fn test_dependency_profile() {
    let landscape: Landscape = "p MK 5\nm 0 1 2\n0 0 0 0 0 0 0 0\nm 2 3\n0 0 0 0\nm 4\n0 0\n"
        .parse()
        .unwrap();
    let profile = landscape.dependency_profile();
    // bit 4 only appears alone and is not counted
    assert_eq!(profile.counts.len(), 4);
    assert_eq!(profile.counts[&2], 3);
    assert_eq!(profile.counts[&3], 1);
    assert_eq!(profile.mean(), Some((2 + 2 + 3 + 1) as f64 / 4.0));
}

#[test]
fn test_dependency_profile_empty() {
    let landscape: Landscape = "p MK 2\nm 0\n0 1\n".parse().unwrap();
    assert_eq!(landscape.dependency_profile().mean(), None);
}
