use std::rc::Rc;

/// Event handler attached to an element in the view tree.
pub type Action = Rc<dyn Fn()>;

/// Macro to create event handlers that capture signals and execute closures
///
/// Usage examples:
/// ```rust
/// use herald::{action, signal};
///
/// let count = signal!(0);
/// let other = signal!(0);
///
/// // Single signal, captured under the same name
/// let inc = action!(count => { count.update(|c| *c += 1); });
///
/// // Multiple signals
/// let both = action!(count, other => { count.set(other.get()); });
///
/// // Custom variable name
/// let reset = action!(count as c => { c.set(0); });
///
/// inc();
/// assert_eq!(count.get(), 1);
/// both();
/// assert_eq!(count.get(), 0);
/// reset();
/// ```
#[macro_export]
macro_rules! action {
    ($($signal:ident),+ => $body:block) => {
        {
            $(let $signal = $signal.clone();)+
            let action: $crate::action::Action = ::std::rc::Rc::new(move || $body);
            action
        }
    };

    ($($signal:ident as $captured:ident),+ => $body:block) => {
        {
            $(let $captured = $signal.clone();)+
            let action: $crate::action::Action = ::std::rc::Rc::new(move || $body);
            action
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::signal;

    #[test]
    fn action_captures_signal_clone() {
        let count = signal!(0);
        let inc = action!(count => { count.update(|c| *c += 1); });

        inc();
        inc();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn action_with_renamed_captures() {
        let left = signal!(2);
        let right = signal!(3);
        let sum = signal!(0);
        let add = action!(left as l, right as r, sum as s => { s.set(l.get() + r.get()); });

        add();
        assert_eq!(sum.get(), 5);
    }
}
