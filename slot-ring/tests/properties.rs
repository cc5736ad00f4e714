use proptest::prelude::*;
use slot_ring::{Error, HeapBuffer};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    Pop,
    Peek(usize),
    PushString(Vec<u8>),
    ReadString(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Push),
        3 => Just(Op::Pop),
        2 => (0usize..20).prop_map(Op::Peek),
        2 => proptest::collection::vec(1u8..=255, 0..8).prop_map(Op::PushString),
        2 => (0usize..8).prop_map(Op::ReadString),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn behaves_like_bounded_queue(capacity in 2usize..24, ops in proptest::collection::vec(op(), 0..200)) {
        let mut buf = HeapBuffer::new(capacity);
        let mut model: VecDeque<u8> = VecDeque::new();
        let usable = capacity - 1;

        for op in ops {
            match op {
                Op::Push(b) => {
                    let result = buf.push_byte(b);
                    if model.len() < usable {
                        prop_assert_eq!(result, Ok(()));
                        model.push_back(b);
                    } else {
                        prop_assert_eq!(result, Err(Error::Full));
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(buf.pop_byte(), model.pop_front().ok_or(Error::Empty));
                }
                Op::Peek(i) => {
                    prop_assert_eq!(buf.peek(i), model.get(i).copied().ok_or(Error::Fail));
                }
                Op::PushString(s) => {
                    let result = buf.push_string(&s);
                    let available = usable - model.len();
                    if s.len() < available {
                        prop_assert_eq!(result, Ok(()));
                        model.extend(s.iter().copied());
                        model.push_back(0);
                    } else {
                        prop_assert_eq!(result, Err(Error::Overflow { needed: s.len() + 1, available }));
                    }
                }
                Op::ReadString(n) => {
                    let mut dest = vec![0xaa; n + 1];
                    let result = buf.read_string(n, &mut dest);
                    if model.len() < n {
                        prop_assert_eq!(result, Err(Error::Fail));
                        prop_assert!(dest.iter().all(|&b| b == 0xaa));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        let expected: Vec<u8> = model.drain(..n).collect();
                        prop_assert_eq!(&dest[..n], expected.as_slice());
                        prop_assert_eq!(dest[n], 0);
                        if model.front() == Some(&0) {
                            model.pop_front();
                        }
                    }
                }
                Op::Clear => {
                    buf.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(buf.used_space(), model.len());
            prop_assert_eq!(buf.used_space() + buf.available_space(), usable);
            prop_assert_eq!(buf.is_empty(), model.is_empty());
            prop_assert_eq!(buf.is_full(), model.len() == usable);

            let (first, second) = buf.as_slices();
            let contents: Vec<u8> = first.iter().chain(second).copied().collect();
            let expected: Vec<u8> = model.iter().copied().collect();
            prop_assert_eq!(contents, expected);
        }
    }

    #[test]
    fn writable_slices_match_available_space(capacity in 2usize..24, pushes in 0usize..48, pops in 0usize..48) {
        let mut buf = HeapBuffer::new(capacity);
        for i in 0..pushes {
            let _ = buf.push_byte(i as u8);
            if i < pops {
                let _ = buf.pop_byte();
            }
        }

        let available = buf.available_space();
        let (first, second) = buf.as_mut_slices();
        prop_assert_eq!(first.len() + second.len(), available);
        prop_assert!(second.is_empty() || !first.is_empty());
    }

    #[test]
    fn peek_matches_next_pop(capacity in 2usize..24, data in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut buf = HeapBuffer::new(capacity);
        for b in data {
            if buf.push_byte(b).is_err() {
                let next = buf.peek(0);
                prop_assert_eq!(buf.pop_byte(), next);
                prop_assert_eq!(buf.push_byte(b), Ok(()));
            }
        }
    }
}
