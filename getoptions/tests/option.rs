use std::collections::HashMap;

use getoptions::*;
use pretty_assertions::assert_eq;

// ── Scenarios ─────────────────────────────────────────────────────

#[test]
fn bool_false_becomes_true() {
    let b = Dest::new(false);
    let mut opt = Opt::new("help", Kind::Bool).set_bool_ptr(&b);
    assert_eq!(opt.save(&[""]), Ok(()));
    assert!(b.get());
}

#[test]
fn set_bool_overwrites_initial_before_toggle() {
    let b = Dest::new(true);
    let mut opt = Opt::new("help", Kind::Bool).set_bool_ptr(&b).set_bool(false);
    assert_eq!(opt.save(&[""]), Ok(()));
    assert!(b.get());
}

#[test]
fn int_error_reports_alias_and_token() {
    let i = Dest::new(0);
    let mut opt = Opt::new("help", Kind::Int).set_int_ptr(&i);
    let err = opt.set_called("int").save(&["123x"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        text::format(text::ERROR_CONVERT_TO_INT, &["int", "123x"])
    );
    assert_eq!(i.get(), 0);
}

#[test]
fn int_list_range() {
    let s = Dest::new(Vec::new());
    let mut opt = Opt::new("help", Kind::IntList).set_int_slice_ptr(&s);
    assert_eq!(opt.save(&["1..5"]), Ok(()));
    assert_eq!(s.get(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn int_list_reversed_range_rejected() {
    let s = Dest::new(Vec::new());
    let mut opt = Opt::new("help", Kind::IntList).set_int_slice_ptr(&s);
    let err = opt.save(&["5..1"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        Catalog::default().convert_to_int("", "5..1")
    );
    assert!(s.get().is_empty());
}

#[test]
fn int_list_huge_range_is_an_error() {
    for bad in [
        "0..9223372036854775807",
        "-9223372036854775808..9223372036854775807",
    ] {
        let s = Dest::new(Vec::new());
        let mut opt = Opt::new("port", Kind::IntList).set_int_slice_ptr(&s);
        let err = opt.set_called("port").save(&[bad]).unwrap_err();
        assert_eq!(err, Error::ConvertToInt {
            called_as: "port".to_string(),
            token: bad.to_string(),
            message: Catalog::default().convert_to_int("port", bad),
        });
        assert!(s.get().is_empty());
    }
    let s = Dest::new(Vec::new());
    let mut opt = Opt::new("port", Kind::IntList).set_int_slice_ptr(&s);
    opt.save(&["9223372036854775806..9223372036854775807"]).unwrap();
    assert_eq!(s.get(), vec![i64::MAX - 1, i64::MAX]);
}

#[test]
fn map_key_lowercased_value_verbatim() {
    let m = Dest::new(HashMap::new());
    let mut opt = Opt::new("help", Kind::StringMap)
        .set_string_map_ptr(&m)
        .set_map_keys_to_lower();
    assert_eq!(opt.save(&["Hola=Mundo"]), Ok(()));
    let want: HashMap<String, String> = [("hola".to_string(), "Mundo".to_string())].into();
    assert_eq!(m.get(), want);
}

#[test]
fn required_never_called() {
    let b = Dest::new(false);
    let opt = Opt::new("help", Kind::Bool).set_bool_ptr(&b).set_required("");
    assert_eq!(
        opt.check_required().unwrap_err().to_string(),
        Catalog::default().missing_required_option("help")
    );
}

#[test]
fn int_list_synopsis() {
    let mut opt = Opt::new("help", Kind::IntList).set_max_args(2);
    opt.synopsis();
    assert_eq!(opt.help_synopsis(), "--help <int>...");
}

// ── Invariants ────────────────────────────────────────────────────

/// One option of every kind, each bound to a fresh destination.
fn bound_options() -> Vec<Opt> {
    vec![
        Opt::new("b", Kind::Bool).set_bool_ptr(&Dest::new(true)),
        Opt::new("s", Kind::String).set_string_ptr(&Dest::new("init".to_string())),
        Opt::new("i", Kind::Int).set_int_ptr(&Dest::new(7)),
        Opt::new("f", Kind::Float).set_float64_ptr(&Dest::new(1.5)),
        Opt::new("ss", Kind::StringList).set_string_slice_ptr(&Dest::new(vec!["x".to_string()])),
        Opt::new("ii", Kind::IntList).set_int_slice_ptr(&Dest::new(vec![3])),
        Opt::new("m", Kind::StringMap).set_string_map_ptr(&Dest::new(HashMap::new())),
    ]
}

/// What the destination holds, read through the typed accessor.
fn dest_value(opt: &Opt) -> Value {
    match opt.kind() {
        Kind::Bool => Value::Bool(opt.bool()),
        Kind::String => Value::String(opt.string()),
        Kind::Int => Value::Int(opt.int()),
        Kind::Float => Value::Float64(opt.float64()),
        Kind::StringList => Value::StringSlice(opt.string_slice()),
        Kind::IntList => Value::IntSlice(opt.int_slice()),
        Kind::StringMap => Value::StringMap(opt.string_map()),
    }
}

#[test]
fn destination_mirrors_value_after_success() {
    let good: &[&[&str]] = &[
        &[""],
        &["hola"],
        &["42"],
        &["2.5"],
        &["a", "b"],
        &["1..3", "9"],
        &["k=v", "K=w"],
    ];
    for (mut opt, tokens) in bound_options().into_iter().zip(good) {
        assert_eq!(dest_value(&opt), opt.value(), "{} before", opt.name());
        opt.save(tokens).unwrap();
        assert_eq!(dest_value(&opt), opt.value(), "{} after", opt.name());
        assert!(opt.called());
    }
}

#[test]
fn failed_save_changes_nothing() {
    let bad: &[(&str, &[&str])] = &[
        ("i", &["nope"]),
        ("f", &["1.2.3"]),
        ("ii", &["1", "2..1"]),
        ("m", &["a=b", "c"]),
    ];
    let mut opts = bound_options();
    for (name, tokens) in bad {
        let opt = opts.iter_mut().find(|o| o.name() == *name).unwrap();
        let before = (opt.value(), dest_value(opt), opt.called());
        assert!(opt.save(tokens).is_err(), "{}", name);
        assert_eq!((opt.value(), dest_value(opt), opt.called()), before, "{}", name);
    }
}

#[test]
fn required_unmet_by_failed_save_alone() {
    let mut opt = Opt::new("n", Kind::Int).set_required("need n");
    assert!(opt.save(&["x"]).is_err());
    assert_eq!(opt.check_required().unwrap_err().to_string(), "need n");
    opt.save(&["1"]).unwrap();
    assert_eq!(opt.check_required(), Ok(()));
}

#[test]
fn required_follows_called_not_save_outcome() {
    let mut opt = Opt::new("n", Kind::Int).set_required("need n");
    opt.set_called("n");
    assert!(opt.save(&["x"]).is_err());
    assert_eq!(opt.check_required(), Ok(()));
}

#[test]
fn setters_in_any_order() {
    let a = Dest::new(0);
    let b = Dest::new(0);
    let first = Opt::new("n", Kind::Int).set_int(3).set_int_ptr(&a);
    let second = Opt::new("n", Kind::Int).set_int_ptr(&b).set_int(3);
    assert_eq!((a.get(), first.value()), (b.get(), second.value()));
}

#[test]
fn accessor_reads_through_caller_writes() {
    let l = Dest::new(Vec::new());
    let mut opt = Opt::new("tag", Kind::StringList).set_string_slice_ptr(&l);
    opt.save(&["a"]).unwrap();
    l.borrow_mut().push("caller".to_string());
    assert_eq!(opt.string_slice(), vec!["a".to_string(), "caller".to_string()]);
    // The mirror keeps what the option itself stored.
    assert_eq!(opt.value(), Value::StringSlice(vec!["a".to_string()]));
    // The next save builds on the destination.
    opt.save(&["b"]).unwrap();
    assert_eq!(l.get(), vec!["a", "caller", "b"]);
}

#[test]
fn sort_orders_names() {
    let mut opts = vec![
        Opt::new("zeta", Kind::Bool),
        Opt::new("alpha", Kind::Int),
        Opt::new("Mid", Kind::String),
        Opt::new("alpha", Kind::Float),
    ];
    sort(&mut opts);
    let names: Vec<_> = opts.iter().map(|o| o.name()).collect();
    assert_eq!(names, vec!["Mid", "alpha", "alpha", "zeta"]);
    assert_eq!(opts[1].kind(), Kind::Int);
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn error_variants_expose_fields() {
    let mut opt = Opt::new("define", Kind::StringMap);
    match opt.save(&["novalue"]) {
        Err(Error::NotKeyValue { token, .. }) => assert_eq!(token, "novalue"),
        other => panic!("unexpected {:?}", other),
    }
    let opt = Opt::new("x", Kind::Bool).set_required("");
    match opt.check_required() {
        Err(Error::MissingRequired { name, .. }) => assert_eq!(name, "x"),
        other => panic!("unexpected {:?}", other),
    }
}
