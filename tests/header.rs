use deframer::sans::header::{
    HeaderAccumulator, HeaderDecoder, HeaderError, HeaderValue, MajorityVote, Repetition,
};

#[test]
fn vote_ignores_offset_fields() {
    // Only the whitener offset fields are set.
    let raw = HeaderValue(0xF000_F000);
    assert_eq!(MajorityVote.decode(raw), Ok(HeaderValue(5)));
}

#[test]
fn vote_tie_is_ambiguous() {
    assert_eq!(
        MajorityVote.decode(HeaderValue(0x0000_0FFF)),
        Err(HeaderError::Ambiguous)
    );
    assert_eq!(
        MajorityVote.decode(HeaderValue(0xF555_F555)),
        Err(HeaderError::Ambiguous)
    );
}

#[test]
fn vote_sentinels() {
    assert_eq!(MajorityVote.decode(HeaderValue::REQUEST), Ok(HeaderValue(5)));
    assert_eq!(MajorityVote.decode(HeaderValue::DATA), Ok(HeaderValue(260)));
    assert_eq!(MajorityVote.decode(HeaderValue(0x0FFF_0001)), Ok(HeaderValue(260)));
}

#[test]
fn repeated_layout() {
    let h = HeaderValue::repeated(0x123, 0xA);
    assert_eq!(h, HeaderValue(0xA123_A123));
    assert_eq!(h.payload_length(), 0x123);
    assert_eq!(h.whitener_offset(), 0xA);
    assert_eq!(Repetition.decode(h), Ok(h));
}

#[test]
fn repeated_truncates_fields() {
    assert_eq!(HeaderValue::repeated(0xF123, 0x1A), HeaderValue(0xA123_A123));
}

#[test]
fn repetition_mismatch() {
    assert_eq!(
        Repetition.decode(HeaderValue(0x0005_0004)),
        Err(HeaderError::Mismatch { high: 5, low: 4 })
    );
}

#[test]
fn accumulator_first_bit_is_most_significant() {
    let mut a = HeaderAccumulator::default();
    assert_eq!(a.shift(true), None);
    for _ in 1..31 {
        assert_eq!(a.shift(false), None);
    }
    assert_eq!(a.shift(true), Some(HeaderValue(0x8000_0001)));
}

#[test]
fn accumulator_clear_restarts() {
    let mut a = HeaderAccumulator::default();
    for _ in 0..20 {
        a.shift(true);
    }
    a.clear();
    for _ in 0..31 {
        assert_eq!(a.shift(false), None);
    }
    assert_eq!(a.shift(false), Some(HeaderValue(0)));
}
