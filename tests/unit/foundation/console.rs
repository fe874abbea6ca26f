use super::*;
use crate::test_support::captured_console as console;

#[test]
fn muted_output_is_discarded_and_restored_on_drop() {
    let (mut c, out, _) = console();
    writeln!(c.out(), "before").unwrap();
    {
        let mut muted = c.mute();
        assert!(muted.is_muted());
        writeln!(muted.out(), "hidden").unwrap();
    }
    assert!(!c.is_muted());
    writeln!(c.out(), "after").unwrap();
    assert_eq!(out.text(), "before\nafter\n");
}

#[test]
fn error_stream_is_never_muted() {
    let (mut c, _, err) = console();
    let mut muted = c.mute();
    writeln!(muted.err(), "diagnostic").unwrap();
    drop(muted);
    assert_eq!(err.text(), "diagnostic\n");
}

#[test]
fn mute_when_false_keeps_output_visible() {
    let (mut c, out, _) = console();
    let mut guard = c.mute_when(false);
    writeln!(guard.out(), "visible").unwrap();
    drop(guard);
    assert_eq!(out.text(), "visible\n");
}

#[test]
fn nested_guards_restore_outer_state() {
    let (mut c, out, _) = console();
    {
        let mut outer = c.mute();
        {
            let inner = outer.mute_when(false);
            assert!(inner.is_muted());
        }
        assert!(outer.is_muted());
        writeln!(outer.out(), "hidden").unwrap();
    }
    assert!(!c.is_muted());
    assert_eq!(out.text(), "");
}

#[test]
fn guard_restores_during_unwind() {
    let (mut c, _, _) = console();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _muted = c.mute();
        panic!("scene blew up");
    }));
    assert!(result.is_err());
    assert!(!c.is_muted());
}
