use streamchart::{Sample, SampleBuffer, DEFAULT_CAPACITY};

fn samples(ids: std::ops::Range<u64>, step_ms: i64) -> Vec<Sample> {
    ids.map(|id| Sample::with_id(id as i64 * step_ms, id as f64, id))
        .collect()
}

#[test]
fn default_capacity_is_twenty_thousand() {
    let buf = SampleBuffer::default();
    assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
    assert_eq!(DEFAULT_CAPACITY, 20_000);
    assert!(buf.is_empty());
    assert!(buf.bounds().is_none());
}

#[test]
fn full_buffer_evicts_oldest_on_append() {
    let mut buf = SampleBuffer::with_initial(20_000, samples(0..20_000, 100));
    assert_eq!(buf.len(), 20_000);

    let chunk = (10_000..10_005u64).map(|id| Sample::with_id(2_000_000 + id as i64, 0.0, id));
    let evicted = buf.append(chunk);

    assert_eq!(evicted, 5);
    assert_eq!(buf.len(), 20_000, "length must stay at capacity");
    assert_eq!(buf.first().and_then(|s| s.id), Some(5), "ids 0..4 evicted");
    let tail: Vec<u64> = buf.iter().rev().take(5).filter_map(|s| s.id).collect();
    assert_eq!(tail, vec![10_004, 10_003, 10_002, 10_001, 10_000]);
}

#[test]
fn retained_samples_are_the_most_recent_by_arrival() {
    let mut buf = SampleBuffer::new(7);
    for chunk in [0..3u64, 3..6, 6..12] {
        buf.append(samples(chunk, 10));
    }
    let ids: Vec<u64> = buf.iter().filter_map(|s| s.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8, 9, 10, 11]);
}

#[test]
fn out_of_order_chunks_are_kept_as_delivered() {
    let mut buf = SampleBuffer::new(10);
    buf.append(vec![Sample::new(100, 1.0), Sample::new(50, 2.0)]);
    let ts: Vec<i64> = buf.iter().map(|s| s.timestamp).collect();
    assert_eq!(ts, vec![100, 50]);
}

#[test]
fn interaction_bounds_need_two_samples() {
    let mut buf = SampleBuffer::new(10);
    buf.append(vec![Sample::new(1_000, 1.0)]);
    assert!(buf.bounds().is_some());
    assert!(buf.interaction_bounds().is_none());

    buf.append(vec![Sample::new(2_000, 1.0)]);
    let b = buf.interaction_bounds().expect("two samples");
    assert_eq!((b.min_t, b.max_t), (1_000.0, 2_000.0));
}

#[test]
fn single_timestamp_still_has_unit_span() {
    let buf = SampleBuffer::with_initial(10, vec![Sample::new(5, 1.0)]);
    assert_eq!(buf.bounds().unwrap().total_span(), 1.0);
}

#[test]
fn index_range_is_inclusive_on_both_ends() {
    let buf = SampleBuffer::with_initial(100, samples(0..10, 100));
    assert_eq!(buf.index_range(200.0, 500.0), 2..6);
    assert_eq!(buf.index_range(150.0, 250.0), 2..3);
    assert!(buf.index_range(210.0, 290.0).is_empty());
    assert_eq!(buf.index_range(-1e9, 1e9), 0..10);
}

#[test]
fn shrinking_capacity_evicts() {
    let mut buf = SampleBuffer::with_initial(100, samples(0..10, 1));
    assert_eq!(buf.set_capacity(4), 6);
    assert_eq!(buf.first().and_then(|s| s.id), Some(6));
}
