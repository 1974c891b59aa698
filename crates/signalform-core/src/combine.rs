#![forbid(unsafe_code)]

//! Combine-latest joins over two and three streams.
//!
//! A combined stream emits a new value whenever *any* input emits, applying
//! the join function to the most recently emitted value of every input. It
//! emits nothing until every input has emitted at least once; once all inputs
//! are primed, stale values are never substituted for missing ones. If every
//! input is already primed at construction, the join seeds itself
//! immediately.

use std::rc::Rc;

use crate::stream::Stream;

impl<T: Clone + 'static> Stream<T> {
    /// Join two streams with combine-latest semantics.
    #[must_use]
    pub fn combine2<A, B>(
        a: &Stream<A>,
        b: &Stream<B>,
        join: impl Fn(&A, &B) -> T + 'static,
    ) -> Stream<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
    {
        let out = Stream::new();
        let recombine = {
            let a = a.clone();
            let b = b.clone();
            let weak_out = out.downgrade();
            Rc::new(move || {
                let (Some(va), Some(vb)) = (a.latest(), b.latest()) else {
                    return;
                };
                if let Some(inner) = weak_out.upgrade() {
                    Stream::emit_into(&inner, join(&va, &vb));
                }
            })
        };

        let on_a = Rc::clone(&recombine);
        let sub_a = a.subscribe(move |_: &A| on_a());
        let on_b = Rc::clone(&recombine);
        let sub_b = b.subscribe(move |_: &B| on_b());

        out.keep(sub_a);
        out.keep(sub_b);
        out.keep(a.clone());
        out.keep(b.clone());

        recombine();
        out
    }

    /// Join three streams with combine-latest semantics.
    #[must_use]
    pub fn combine3<A, B, C>(
        a: &Stream<A>,
        b: &Stream<B>,
        c: &Stream<C>,
        join: impl Fn(&A, &B, &C) -> T + 'static,
    ) -> Stream<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Clone + 'static,
    {
        let out = Stream::new();
        let recombine = {
            let a = a.clone();
            let b = b.clone();
            let c = c.clone();
            let weak_out = out.downgrade();
            Rc::new(move || {
                let (Some(va), Some(vb), Some(vc)) = (a.latest(), b.latest(), c.latest()) else {
                    return;
                };
                if let Some(inner) = weak_out.upgrade() {
                    Stream::emit_into(&inner, join(&va, &vb, &vc));
                }
            })
        };

        let on_a = Rc::clone(&recombine);
        let sub_a = a.subscribe(move |_: &A| on_a());
        let on_b = Rc::clone(&recombine);
        let sub_b = b.subscribe(move |_: &B| on_b());
        let on_c = Rc::clone(&recombine);
        let sub_c = c.subscribe(move |_: &C| on_c());

        out.keep(sub_a);
        out.keep(sub_b);
        out.keep(sub_c);
        out.keep(a.clone());
        out.keep(b.clone());
        out.keep(c.clone());

        recombine();
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_nothing_until_all_inputs_primed() {
        let a: Stream<i32> = Stream::new();
        let b: Stream<i32> = Stream::new();
        let sum = Stream::combine2(&a, &b, |x, y| x + y);

        assert!(!sum.is_primed());
        a.emit(1);
        assert!(!sum.is_primed());
        b.emit(2);
        assert_eq!(sum.latest(), Some(3));
    }

    #[test]
    fn emits_on_every_input_emission_once_primed() {
        let a = Stream::new();
        let b = Stream::new();
        let sum = Stream::combine2(&a, &b, |x: &i32, y: &i32| x + y);
        let emissions = Rc::new(RefCell::new(Vec::new()));
        let emissions_in_cb = Rc::clone(&emissions);
        let _sub = sum.subscribe(move |v: &i32| emissions_in_cb.borrow_mut().push(*v));

        a.emit(1);
        b.emit(10);
        a.emit(2);
        b.emit(20);
        assert_eq!(*emissions.borrow(), vec![11, 12, 22]);
    }

    #[test]
    fn uses_latest_value_of_every_input() {
        let a = Stream::new();
        let b = Stream::new();
        let pair = Stream::combine2(&a, &b, |x: &i32, y: &i32| (*x, *y));

        a.emit(1);
        a.emit(2);
        a.emit(3);
        b.emit(100);
        assert_eq!(pair.latest(), Some((3, 100)));
    }

    #[test]
    fn seeds_when_all_inputs_primed_at_construction() {
        let a = Stream::new();
        let b = Stream::new();
        a.emit(4);
        b.emit(5);

        let product = Stream::combine2(&a, &b, |x: &i32, y: &i32| x * y);
        assert_eq!(product.latest(), Some(20));
    }

    #[test]
    fn does_not_seed_when_one_input_unprimed() {
        let a = Stream::new();
        let b: Stream<i32> = Stream::new();
        a.emit(4);

        let product = Stream::combine2(&a, &b, |x: &i32, y: &i32| x * y);
        assert!(!product.is_primed());
    }

    #[test]
    fn re_emits_when_join_result_is_unchanged() {
        // Combine-latest has no duplicate suppression of its own.
        let a = Stream::new();
        let b = Stream::new();
        let both = Stream::combine2(&a, &b, |x: &bool, y: &bool| *x && *y);
        let emissions = Rc::new(RefCell::new(Vec::new()));
        let emissions_in_cb = Rc::clone(&emissions);
        let _sub = both.subscribe(move |v: &bool| emissions_in_cb.borrow_mut().push(*v));

        a.emit(false);
        b.emit(true);
        a.emit(false);
        assert_eq!(*emissions.borrow(), vec![false, false]);
    }

    #[test]
    fn combine3_waits_for_all_three() {
        let a: Stream<bool> = Stream::new();
        let b: Stream<bool> = Stream::new();
        let c: Stream<bool> = Stream::new();
        let all = Stream::combine3(&a, &b, &c, |x, y, z| *x && *y && *z);

        a.emit(true);
        b.emit(true);
        assert!(!all.is_primed());
        c.emit(true);
        assert_eq!(all.latest(), Some(true));
    }

    #[test]
    fn combine3_recombines_on_any_input() {
        let a = Stream::new();
        let b = Stream::new();
        let c = Stream::new();
        let sum = Stream::combine3(&a, &b, &c, |x: &i32, y: &i32, z: &i32| x + y + z);

        a.emit(1);
        b.emit(2);
        c.emit(3);
        assert_eq!(sum.latest(), Some(6));

        b.emit(20);
        assert_eq!(sum.latest(), Some(24));
    }

    #[test]
    fn chains_with_map() {
        let a = Stream::new();
        let b = Stream::new();
        let description = Stream::combine2(&a, &b, |x: &i32, y: &i32| x + y)
            .map(|total: &i32| format!("total={total}"));

        a.emit(1);
        b.emit(2);
        assert_eq!(description.latest(), Some("total=3".to_string()));
    }
}
