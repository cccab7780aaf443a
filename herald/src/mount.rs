//! Browser mounting: turns the view tree into DOM nodes and re-renders the
//! root after every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event};

use crate::{Node, View};

type DomListener = Closure<dyn FnMut(Event)>;

thread_local! {
    static MOUNTED: RefCell<Vec<(usize, Rc<dyn Teardown>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_MOUNT_ID: Cell<usize> = const { Cell::new(0) };
}

trait Teardown {
    fn teardown(&self);
}

/// Handle to a mounted view.
///
/// Dropping the handle keeps the view mounted; call [`MountHandle::unmount`]
/// to remove it.
#[derive(Debug)]
pub struct MountHandle {
    id: usize,
}

impl MountHandle {
    /// Clear the root element and release every listener.
    ///
    /// Must not be called from inside one of the view's own listeners.
    pub fn unmount(self) {
        let removed = MOUNTED.with(|mounted| {
            let mut mounted = mounted.borrow_mut();
            let index = mounted.iter().position(|(id, _)| *id == self.id)?;
            Some(mounted.remove(index).1)
        });

        if let Some(mount) = removed {
            mount.teardown();
        }
    }
}

struct Mounted<V: View> {
    view: V,
    root: web_sys::Element,
    document: Document,
    live: RefCell<Vec<DomListener>>,
    retired: RefCell<Vec<DomListener>>,
}

impl<V: View + 'static> Mounted<V> {
    fn render(self: &Rc<Self>) -> Result<(), JsValue> {
        let html = self.view.render();

        // The listener currently running belongs to `live`; it stays alive in
        // `retired` until the next render.
        let previous = self.live.take();
        *self.retired.borrow_mut() = previous;

        self.root.set_inner_html("");
        for node in html.nodes() {
            let dom = self.build(node)?;
            self.root.append_child(&dom)?;
        }

        Ok(())
    }

    fn build(self: &Rc<Self>, node: &Node) -> Result<web_sys::Node, JsValue> {
        let element = match node {
            Node::Text(text) => return Ok(self.document.create_text_node(text).into()),
            Node::Element(element) => element,
        };

        let dom = self.document.create_element(element.tag())?;

        for (name, value) in element.attributes() {
            dom.set_attribute(name, value)?;
        }

        for (event, action) in element.listeners() {
            let action = Rc::clone(action);
            let mounted = Rc::downgrade(self);

            let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                action();

                if let Some(mounted) = mounted.upgrade() {
                    if let Err(err) = mounted.render() {
                        web_sys::console::error_1(&err);
                    }
                }
            });

            dom.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
            self.live.borrow_mut().push(listener);
        }

        for child in element.children() {
            dom.append_child(&self.build(child)?)?;
        }

        Ok(dom.into())
    }
}

impl<V: View> Teardown for Mounted<V> {
    fn teardown(&self) {
        self.root.set_inner_html("");
        self.live.borrow_mut().clear();
        self.retired.borrow_mut().clear();
    }
}

/// Render `view` into the element matched by `selector` (or `<body>`).
pub(crate) fn mount<V: View + 'static>(
    view: V,
    selector: Option<&str>,
) -> Result<MountHandle, JsValue> {
    let window = web_sys::window().ok_or("No global window object")?;
    let document = window.document().ok_or("No document object")?;

    let root: web_sys::Element = match selector {
        Some(selector) => match document.query_selector(selector)? {
            Some(element) => element,
            None => document.body().ok_or("No body element")?.into(),
        },
        None => document.body().ok_or("No body element")?.into(),
    };

    let mounted = Rc::new(Mounted {
        view,
        root,
        document,
        live: RefCell::new(Vec::new()),
        retired: RefCell::new(Vec::new()),
    });
    mounted.render()?;

    let id = NEXT_MOUNT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    MOUNTED.with(|registry| registry.borrow_mut().push((id, mounted as Rc<dyn Teardown>)));

    Ok(MountHandle { id })
}
