use combinator_framework::{ArrayChunk, ArrayStream, Ordering, Stream};
use pretty_assertions::assert_eq;

fn nums(values: &[i32]) -> ArrayChunk<i32> {
    ArrayChunk::from(values)
}

fn stream() -> ArrayStream<i32> {
    ArrayStream::natural()
}

#[test]
fn test_take_n_zero() {
    let s = stream();
    for chunk in [nums(&[]), nums(&[1, 2, 3])] {
        let (taken, rest) = s.take_n(0, &chunk).unwrap();
        assert!(s.chunk_empty(&taken));
        assert_eq!(rest, chunk);
    }
}

#[test]
fn test_take_n_on_empty_is_none() {
    assert_eq!(stream().take_n(3, &nums(&[])), None);
}

#[test]
fn test_take_n_short_chunk_returns_everything() {
    let (taken, rest) = stream().take_n(3, &nums(&[10, 11])).unwrap();
    assert_eq!(taken, [10, 11]);
    assert!(rest.is_empty());
}

#[test]
fn test_take_n_splits() {
    let (taken, rest) = stream().take_n(2, &nums(&[1, 2, 3, 4])).unwrap();
    assert_eq!(taken, [1, 2]);
    assert_eq!(rest, [3, 4]);
}

#[test]
fn test_take1() {
    let s = stream();
    assert_eq!(s.take1(&nums(&[])), None);
    let (first, rest) = s.take1(&nums(&[1, 2, 3])).unwrap();
    assert_eq!(first, 1);
    assert_eq!(rest, [2, 3]);
}

#[test]
fn test_take_while_bounds() {
    let s = stream();
    let chunk = nums(&[1, 2, 3]);

    let (matched, rest) = s.take_while(|_| false, &chunk);
    assert!(matched.is_empty());
    assert_eq!(rest, chunk);

    let (matched, rest) = s.take_while(|_| true, &chunk);
    assert_eq!(matched, chunk);
    assert!(rest.is_empty());

    let (matched, rest) = s.take_while(|n| *n < 3, &chunk);
    assert_eq!(matched, [1, 2]);
    assert_eq!(rest, [3]);
}

#[test]
fn test_earlier_chunks_survive_later_takes() {
    let s = stream();
    let original = nums(&[1, 2, 3, 4, 5]);
    let (head, rest) = s.take_n(2, &original).unwrap();
    let (next, rest2) = s.take1(&rest).unwrap();
    let _ = s.take_while(|_| true, &rest2);
    assert_eq!(head, [1, 2]);
    assert_eq!(next, 3);
    assert_eq!(rest, [3, 4, 5]);
    assert_eq!(original, [1, 2, 3, 4, 5]);
}

#[test]
fn test_chunk_token_conversions() {
    let s = stream();
    let chunk = s.tokens_to_chunk(&[7, 8]);
    assert_eq!(s.chunk_to_tokens(&chunk), vec![7, 8]);
    assert_eq!(s.chunk_length(&chunk), 2);
    assert_eq!(s.token_to_chunk(9), [9]);
}

#[test]
fn test_chunk_ordering() {
    let s = stream();
    assert_eq!(s.compare_chunks(&nums(&[1, 2]), &nums(&[1, 2, 3])), Ordering::Less);
    assert_eq!(s.compare_chunks(&nums(&[1, 3]), &nums(&[1, 2, 9])), Ordering::Greater);
    assert_eq!(s.compare_chunks(&nums(&[]), &nums(&[])), Ordering::Equal);
}

#[derive(Debug, Clone, PartialEq)]
struct Weight(f64);

#[test]
fn test_tokens_without_ord() {
    let s = ArrayStream::<Weight, _>::with_comparator(|a: &Weight, b: &Weight| {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    });
    let chunk: ArrayChunk<Weight> = vec![Weight(0.5), Weight(1.5)].into();
    let (first, _) = s.take1(&chunk).unwrap();
    assert_eq!(s.compare_tokens(&first, &Weight(1.0)), Ordering::Less);
}
