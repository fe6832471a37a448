use super::*;
use crate::{function, list, record};
use pretty_assertions::assert_eq;

#[test]
fn test_factory_methods() {
    let s = Value::string("hello");
    assert_eq!(s.as_str(), Some("hello"));

    let list = Value::list(vec![Value::from(1), Value::from(2)]);
    assert_eq!(list.as_list().map(<[Value]>::len), Some(2));

    let rec = Value::record_from([("a", 1), ("a", 2)]);
    assert_eq!(rec.field("a"), Some(&Value::from(2)));
    assert_eq!(rec.field("b"), None);
}

#[test]
fn test_conversions() {
    assert_eq!(Value::from(()), Value::Undefined);
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::string("x"));
    assert_eq!(Value::from(3_u64), Value::Number(3.0));
    assert_eq!(Value::from(2.5_f32), Value::Number(2.5));
    assert_eq!([1, 2].into_iter().collect::<Value>(), list![1, 2]);
}

#[test]
fn test_kind_classification() {
    assert_eq!(Value::Undefined.kind(), ValueKind::Nullish);
    assert_eq!(Value::Null.kind(), ValueKind::Nullish);
    assert_eq!(Value::from(true).kind(), ValueKind::Primitive);
    assert_eq!(Value::from(1).kind(), ValueKind::Primitive);
    assert_eq!(Value::from("1").kind(), ValueKind::Primitive);
    assert_eq!(list![].kind(), ValueKind::Sequence);
    assert_eq!(record! {}.kind(), ValueKind::Record);
    assert_eq!(function!(|_: &[Value]| Value::Null).kind(), ValueKind::Callable);
    assert_eq!(Value::shared(list![1]).kind(), ValueKind::Sequence);
}

#[test]
fn test_nullish_and_bool_accessors() {
    assert!(Value::Undefined.is_nullish());
    assert!(Value::Null.is_nullish());
    assert!(!Value::from(0).is_nullish());
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(1).as_bool(), None);
}

#[test]
fn test_resolved_follows_refs() {
    let inner = Value::shared(Value::from(7));
    let outer = Value::shared(inner);
    assert_eq!(outer.resolved(), Value::from(7));
    assert_eq!(outer.type_name(), "ref");
}

#[test]
fn test_resolved_reference_loop_is_undefined() {
    let a = SharedRef::new(Value::Null);
    let b = SharedRef::new(Value::Ref(a.clone()));
    a.set(Value::Ref(b));
    assert_eq!(Value::Ref(a).resolved(), Value::Undefined);
}

#[test]
fn test_display_value() {
    assert_eq!(Value::Undefined.display_value(), "undefined");
    assert_eq!(Value::Null.display_value(), "null");
    assert_eq!(Value::from(true).display_value(), "true");
    assert_eq!(Value::from(1).display_value(), "1");
    assert_eq!(Value::from(1.5).display_value(), "1.5");
    assert_eq!(Value::from(-0.0).display_value(), "0");
    assert_eq!(Value::from(f64::NAN).display_value(), "NaN");
    assert_eq!(Value::from(f64::NEG_INFINITY).display_value(), "-Infinity");
    assert_eq!(Value::from("hi").display_value(), "hi");
    assert_eq!(list![1, list![2, "x"]].display_value(), "[1, [2, x]]");
    assert_eq!(
        record! { "b" => 2, "a" => 1 }.display_value(),
        "{a: 1, b: 2}"
    );
    assert_eq!(Value::function("|x| x", |_| Value::Null).display_value(), "|x| x");
}

#[test]
fn test_display_quotes_strings() {
    assert_eq!(format!("{}", Value::from("hi")), "\"hi\"");
    assert_eq!(format!("{}", list!["a", 1]), "[\"a\", 1]");
}

#[test]
fn test_display_cycle_marks_circular() {
    let cell = SharedRef::new(Value::Null);
    cell.set(list![1, &cell]);
    assert_eq!(Value::Ref(cell).display_value(), "[1, [Circular]]");
}

#[test]
fn test_debug_does_not_descend_refs() {
    let cell = SharedRef::new(Value::Null);
    cell.set(list![&cell]);
    let text = format!("{:?}", Value::Ref(cell));
    assert!(text.starts_with("Ref(0x"));
}

#[test]
fn test_partial_eq_is_strict() {
    assert_ne!(Value::from(1), Value::from("1"));
    assert_ne!(Value::Null, Value::Undefined);
    assert_eq!(list![1, 2], list![1, 2]);

    let cell = SharedRef::new(Value::from(1));
    assert_eq!(Value::from(&cell), Value::from(&cell));
    assert_ne!(Value::from(&cell), Value::shared(Value::from(1)));
}

#[test]
fn test_heap_identity() {
    let a = Value::list(vec![]);
    let b = a.clone();
    let c = Value::list(vec![]);
    match (&a, &b, &c) {
        (Value::List(a), Value::List(b), Value::List(c)) => {
            assert!(Heap::ptr_eq(a, b));
            assert_eq!(a.addr(), b.addr());
            assert!(!Heap::ptr_eq(a, c));
        }
        _ => panic!("expected lists"),
    }
}

#[test]
fn test_function_call() {
    let Value::Function(double) = function!(|args: &[Value]| {
        Value::from(args.first().and_then(Value::as_number).unwrap_or(0.0) * 2.0)
    }) else {
        panic!("expected function");
    };
    assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
    assert!(double.source().contains("args.first()"));
}
