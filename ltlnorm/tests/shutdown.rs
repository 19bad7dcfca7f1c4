use ltlnorm::{release_static_nodes, Formula, Op};
use std::panic;

// The leaf cache is process-wide, so this binary holds a single test.
#[test]
fn leaves_are_released_once_and_for_all() {
    let p = Formula::ap("p");
    let f = Formula::until(p.clone(), Formula::next(Formula::ap("q")));
    assert_eq!(p.owners(), 3);

    release_static_nodes();
    release_static_nodes();

    // live handles keep their nodes
    assert_eq!(p.owners(), 2);
    assert!(f.is(Op::Until));
    assert!(f.child(0).ptr_eq(&p));
    drop(f);
    assert_eq!(p.owners(), 1);

    assert!(panic::catch_unwind(Formula::tt).is_err());
    assert!(panic::catch_unwind(|| Formula::ap("p")).is_err());
}
