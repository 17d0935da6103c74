#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::*;

    const A: StateCell<i32> = StateCell::new("a", || 1);
    const B: StateCell<i32> = StateCell::new("b", || 100);
    const LABEL: StateCell<String> = StateCell::new("label", String::new);

    #[derive(Clone, PartialEq, Debug)]
    struct Pair {
        flag: bool,
        n: u32,
    }
    const PAIR: StateCell<Pair> = StateCell::new("pair", || Pair { flag: false, n: 0 });

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, Rc<RefCell<Vec<T>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (log.clone(), log)
    }

    #[test]
    fn test_lazy_default() {
        let store = Store::new();
        assert!(!store.contains(&A));
        assert_eq!(store.get(&A), 1);
        assert!(store.contains(&A));
        assert_eq!(store.subscriber_count(&A), 0);
    }

    #[test]
    fn test_set_and_update_return_new_value() {
        let store = Store::new();
        assert_eq!(store.set(&A, 5), 5);
        assert_eq!(store.update(&A, |v| v * 3), 15);
        assert_eq!(store.get(&A), 15);
    }

    #[test]
    fn test_subscribe_receives_new_and_old() {
        let store = Store::new();
        let (seen, sink) = recorder::<(i32, i32)>();
        let _sub = store.subscribe(&A, move |new, old| sink.borrow_mut().push((*new, *old)));

        store.set(&A, 2);
        store.update(&A, |v| v + 1);
        assert_eq!(*seen.borrow(), vec![(2, 1), (3, 2)]);
    }

    #[test]
    fn test_equal_write_is_silent() {
        let store = Store::new();
        let (seen, sink) = recorder::<i32>();
        let _sub = store.subscribe(&A, move |new, _| sink.borrow_mut().push(*new));

        store.set(&A, 1);
        store.set(&A, 7);
        store.set(&A, 7);
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_notifications_in_subscription_order() {
        let store = Store::new();
        let (seen, sink) = recorder::<&'static str>();
        let first = sink.clone();
        let _s1 = store.subscribe(&A, move |_, _| first.borrow_mut().push("first"));
        let second = sink.clone();
        let _s2 = store.subscribe(&A, move |_, _| second.borrow_mut().push("second"));

        store.set(&A, 9);
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new();
        let (seen, sink) = recorder::<i32>();
        let sub = store.subscribe(&A, move |new, _| sink.borrow_mut().push(*new));

        store.set(&A, 2);
        sub.run();
        sub.run();
        store.set(&A, 3);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(store.subscriber_count(&A), 0);
    }

    #[test]
    fn test_subscribe_during_dispatch_waits_for_next_round() {
        let store = Store::new();
        let (seen, sink) = recorder::<i32>();

        let _outer = store.subscribe(&A, {
            let store = store.clone();
            let installed = Rc::new(RefCell::new(false));
            move |_, _| {
                if !*installed.borrow() {
                    *installed.borrow_mut() = true;
                    let sink = sink.clone();
                    // leaked on purpose: lives as long as the store
                    let _ = store.subscribe(&A, move |new, _| sink.borrow_mut().push(*new));
                }
            }
        });

        store.set(&A, 2);
        assert!(seen.borrow().is_empty());
        store.set(&A, 3);
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_keeps_round_intact() {
        let store = Store::new();
        let (seen, sink) = recorder::<&'static str>();
        let later: Rc<RefCell<Option<Dispose>>> = Rc::new(RefCell::new(None));

        let _first = store.subscribe(&A, {
            let later = later.clone();
            let sink = sink.clone();
            move |_, _| {
                sink.borrow_mut().push("first");
                if let Some(d) = later.borrow().as_ref() {
                    d.run();
                }
            }
        });
        let second = store.subscribe(&A, move |_, _| sink.borrow_mut().push("second"));
        *later.borrow_mut() = Some(second);

        store.set(&A, 2);
        store.set(&A, 3);
        assert_eq!(*seen.borrow(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_set_from_inside_subscriber() {
        let store = Store::new();
        let _mirror = store.subscribe(&A, {
            let store = store.clone();
            move |new, _| {
                store.set(&B, new * 10);
            }
        });

        store.set(&A, 4);
        assert_eq!(store.get(&B), 40);
    }

    #[test]
    fn test_transact_has_no_torn_reads() {
        let store = Store::new();
        let checks = Rc::new(RefCell::new(0));

        // B is notified before A is; it must still see A's new value
        let _on_b = store.subscribe(&B, {
            let store = store.clone();
            let checks = checks.clone();
            move |new_b, _| {
                assert_eq!(store.get(&A), *new_b - 99);
                *checks.borrow_mut() += 1;
            }
        });
        let _on_a = store.subscribe(&A, {
            let store = store.clone();
            let checks = checks.clone();
            move |new_a, _| {
                assert_eq!(store.get(&B), *new_a + 99);
                *checks.borrow_mut() += 1;
            }
        });

        let out = store.transact((&B, &A), |(b, a)| (b + 5, a + 5));
        assert_eq!(out, (105, 6));
        assert_eq!(*checks.borrow(), 2);
    }

    #[test]
    fn test_transact_only_notifies_changed_cells() {
        let store = Store::new();
        let (seen, sink) = recorder::<&'static str>();
        let a_sink = sink.clone();
        let _a = store.subscribe(&A, move |_, _| a_sink.borrow_mut().push("a"));
        let _b = store.subscribe(&B, move |_, _| sink.borrow_mut().push("b"));

        store.transact((&A, &B), |(a, b)| (a, b + 1));
        assert_eq!(*seen.borrow(), vec!["b"]);
    }

    #[test]
    fn test_transact_mixed_types() {
        let store = Store::new();
        let (label, n) = store.transact((&LABEL, &A), |(label, n)| {
            (format!("{label}#{n}"), n + 1)
        });
        assert_eq!(label, "#1");
        assert_eq!(n, 2);
        assert_eq!(store.get(&LABEL), "#1");
    }

    #[test]
    fn test_watch_fires_on_projection_change_only() {
        let store = Store::new();
        let (seen, sink) = recorder::<bool>();
        let _w = store.watch(&PAIR, |p| p.flag, move |flag| sink.borrow_mut().push(*flag));

        store.update(&PAIR, |p| Pair { n: p.n + 1, ..p.clone() });
        store.update(&PAIR, |p| Pair { flag: true, ..p.clone() });
        store.update(&PAIR, |p| Pair { n: p.n + 1, ..p.clone() });
        store.update(&PAIR, |p| Pair { flag: false, ..p.clone() });
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_mismatched_type_reinitialises() {
        const AS_INT: StateCell<i32> = StateCell::new("shared", || 3);
        const AS_TEXT: StateCell<String> = StateCell::new("shared", || "x".to_string());

        let store = Store::new();
        store.set(&AS_INT, 8);
        assert_eq!(store.get(&AS_TEXT), "x");
        assert_eq!(store.get(&AS_INT), 3);
    }

    #[test]
    fn test_clear_drops_values_and_subscribers() {
        let store = Store::new();
        let (seen, sink) = recorder::<i32>();
        let _sub = store.subscribe(&A, move |new, _| sink.borrow_mut().push(*new));
        store.set(&A, 50);

        store.clear();
        assert!(!store.contains(&A));
        assert_eq!(store.subscriber_count(&A), 0);
        assert_eq!(store.get(&A), 1);
        store.set(&A, 60);
        assert_eq!(*seen.borrow(), vec![50]);
    }

    #[test]
    fn test_with_runs_initialiser() {
        let store = Store::with(|s| {
            s.set(&A, 42);
        });
        assert_eq!(store.get(&A), 42);
    }

    #[test]
    fn test_stores_are_independent() {
        let left = Store::new();
        let right = Store::new();
        left.set(&A, 10);
        assert_eq!(right.get(&A), 1);
    }

    #[test]
    fn test_dispose_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let d = Dispose::new({
            let count = count.clone();
            move || *count.borrow_mut() += 1
        });
        let d2 = d.clone();
        d.run();
        d2.run();
        assert_eq!(*count.borrow(), 1);
        assert!(d.is_spent());
        assert!(Dispose::noop().is_spent());
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::new();
        let child = scope.child();
        for name in ["one", "two"] {
            let cleaned_up = cleaned_up.clone();
            scope.add_disposer(move || cleaned_up.borrow_mut().push(name));
        }
        let in_child = cleaned_up.clone();
        child.add_disposer(move || in_child.borrow_mut().push("child"));
        assert_eq!(scope.pending(), 2);

        scope.dispose();
        assert_eq!(*cleaned_up.borrow(), vec!["child", "one", "two"]);
    }

    #[test]
    fn test_scope_drop_runs_disposers() {
        let store = Store::new();
        {
            let scope = Scope::new();
            scope.add(store.subscribe(&A, |_, _| {}));
            assert_eq!(store.subscriber_count(&A), 1);
        }
        assert_eq!(store.subscriber_count(&A), 0);
    }

    #[test]
    fn test_scope_forgets_spent_handles() {
        let store = Store::new();
        let scope = Scope::new();
        for _ in 0..50 {
            let sub = store.subscribe(&A, |_, _| {});
            scope.add(sub.clone());
            sub.run();
        }
        assert_eq!(store.subscriber_count(&A), 0);
        assert!(scope.held() <= 1);
        assert_eq!(scope.pending(), 0);

        let live = store.subscribe(&A, |_, _| {});
        scope.add(live);
        assert_eq!(scope.held(), 1);
        assert_eq!(scope.pending(), 1);
        scope.dispose();
        assert_eq!(store.subscriber_count(&A), 0);
    }
}
