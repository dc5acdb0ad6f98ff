use skycal_core::{Change, Changes, Notifier};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn changes_set_semantics() {
    let mut c = Changes::empty();
    assert!(c.is_empty());
    c.insert(Change::Points);
    c.insert(Change::Points);
    c.insert(Change::Step);
    assert!(c.contains(Change::Points));
    assert!(!c.contains(Change::Render));
    // iteration follows declaration order, not insertion order
    assert_eq!(c.iter().collect::<Vec<_>>(), vec![Change::Points, Change::Step]);
    let all: Changes = Change::ALL.into_iter().collect();
    assert_eq!(all.iter().count(), Change::ALL.len());
}

#[test]
fn listeners_run_in_subscription_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut n = Notifier::new();
    let l1 = log.clone();
    n.subscribe(move |c| l1.borrow_mut().push(("a", c)));
    let l2 = log.clone();
    n.subscribe(move |c| l2.borrow_mut().push(("b", c)));

    n.dispatch([Change::Selection, Change::Render].into_iter().collect());
    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Change::Selection),
            ("b", Change::Selection),
            ("a", Change::Render),
            ("b", Change::Render),
        ]
    );
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let hits = Rc::new(RefCell::new(0));
    let mut n = Notifier::new();
    let h = hits.clone();
    let id = n.subscribe(move |_| *h.borrow_mut() += 1);
    assert_eq!(n.len(), 1);
    assert!(n.unsubscribe(id));
    assert!(!n.unsubscribe(id));
    assert!(n.is_empty());
    n.dispatch([Change::Points].into_iter().collect());
    assert_eq!(*hits.borrow(), 0);
}
