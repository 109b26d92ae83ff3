//! Element registry, layout reads and DOM mutation
//!
//! Every element the page touches is registered once and tagged with a
//! per-instance attribute holding its [`ElementId`], which lets event targets
//! be mapped back to handles without scanning the registry.

use page_fx_interaction::Surface;
use page_fx_shared::{Effect, ElementId, PageFxError, PageFxResult, Rect, SectionBox, Target, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement, Window};

pub struct Dom {
    window: Window,
    document: Document,
    elements: Vec<Element>,
    inserted: Vec<ElementId>,
    id_attribute: String,
}

impl Dom {
    /// `scope` keeps the id attributes of concurrently mounted pages apart
    pub fn new(scope: &str) -> PageFxResult<Self> {
        let window = web_sys::window().ok_or_else(|| PageFxError::HostUnavailable {
            object: "window".to_string(),
        })?;
        let document = window.document().ok_or_else(|| PageFxError::HostUnavailable {
            object: "document".to_string(),
        })?;
        Ok(Self {
            window,
            document,
            elements: Vec::new(),
            inserted: Vec::new(),
            id_attribute: format!("data-fx-{scope}"),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn register(&mut self, element: Element) -> ElementId {
        if let Some(id) = self.lookup(&element) {
            return id;
        }
        let id = ElementId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        if let Err(err) = element.set_attribute(&self.id_attribute, &id.0.to_string()) {
            log::debug!("Could not tag element {id}: {err:?}");
        }
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    pub fn lookup(&self, element: &Element) -> Option<ElementId> {
        let value = element.get_attribute(&self.id_attribute)?;
        let id = ElementId(value.parse().ok()?);
        (self.get(id)? == element).then_some(id)
    }

    /// Registered elements from `element` up to the root, innermost first
    pub fn path_of(&self, element: Option<Element>) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = element;
        while let Some(node) = current {
            if let Some(id) = self.lookup(&node) {
                path.push(id);
            }
            current = node.parent_element();
        }
        path
    }

    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        query_all_in(&self.document, selector)
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Untag every registered element and remove the ones this page inserted
    pub fn release(&self) {
        for element in &self.elements {
            element.remove_attribute(&self.id_attribute).ok();
        }
        for element in self.inserted.iter().filter_map(|id| self.get(*id)) {
            element.remove();
        }
    }

    fn resolve(&self, target: &Target) -> Vec<Element> {
        match target {
            Target::Element(id) => self.get(*id).cloned().into_iter().collect(),
            Target::Descendant { root, selector } => self
                .get(*root)
                .and_then(|root| root.query_selector(selector).ok().flatten())
                .into_iter()
                .collect(),
            Target::Selector(selector) => self.query_all(selector),
        }
    }

    /// Apply an effect that only mutates elements. Returns `false` for effects
    /// the caller has to handle (scrolling, events, observers, scheduling).
    pub fn apply_mutation(&self, effect: &Effect) -> bool {
        match effect {
            Effect::SetStyle {
                target,
                property,
                value,
            } => self.for_each(target, |el| {
                if let Some(style) = style_of(el) {
                    style.set_property(property, value).map(|_| ())
                } else {
                    Ok(())
                }
            }),
            Effect::RemoveStyle { target, property } => self.for_each(target, |el| {
                if let Some(style) = style_of(el) {
                    style.remove_property(property).map(|_| ())
                } else {
                    Ok(())
                }
            }),
            Effect::AddClass { target, class } => {
                self.for_each(target, |el| el.class_list().add_1(class))
            }
            Effect::RemoveClass { target, class } => {
                self.for_each(target, |el| el.class_list().remove_1(class))
            }
            Effect::SetClassName { target, class_name } => {
                self.for_each(target, |el| el.set_attribute("class", class_name))
            }
            Effect::SetText { target, text } => self.for_each(target, |el| {
                el.set_text_content(Some(text));
                Ok(())
            }),
            Effect::SetAttribute {
                target,
                name,
                value,
            } => self.for_each(target, |el| el.set_attribute(name, value)),
            Effect::CopyAttribute { target, from, to } => self.for_each(target, |el| {
                match el.get_attribute(from) {
                    Some(value) => el.set_attribute(to, &value),
                    None => Ok(()),
                }
            }),
            Effect::Focus { target } => self.for_each(target, |el| match el.dyn_ref::<HtmlElement>() {
                Some(html) => html.focus(),
                None => Ok(()),
            }),
            Effect::ScrollTo { .. }
            | Effect::PreventDefault
            | Effect::Unobserve { .. }
            | Effect::Defer { .. } => return false,
        }
        true
    }

    fn for_each<F>(&self, target: &Target, mut apply: F)
    where
        F: FnMut(&Element) -> Result<(), wasm_bindgen::JsValue>,
    {
        for element in self.resolve(target) {
            if let Err(err) = apply(&element) {
                log::debug!("DOM update on {target:?} failed: {err:?}");
            }
        }
    }

    /// Create an element with inline styles and append it to the body
    pub fn insert_fixed(&mut self, tag: &str, class: &str, css: &str) -> Option<ElementId> {
        let body = self.document.body()?;
        let element = self.document.create_element(tag).ok()?;
        element.set_class_name(class);
        element.set_attribute("style", css).ok()?;
        body.append_child(&element).ok()?;
        let id = self.register(element);
        self.inserted.push(id);
        Some(id)
    }
}

pub fn query_all_in(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("Invalid selector: {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(SvgElement::style)
}

impl Surface for Dom {
    fn viewport(&self) -> Viewport {
        let number = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        let document_height = self
            .document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        Viewport {
            width: number(self.window.inner_width()),
            height: number(self.window.inner_height()),
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            document_height,
        }
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        let rect = self.get(element)?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn section_box(&self, element: ElementId) -> Option<SectionBox> {
        let html = self.get(element)?.dyn_ref::<HtmlElement>()?;
        Some(SectionBox::new(
            f64::from(html.offset_top()),
            f64::from(html.offset_height()),
        ))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.get(element)?.get_attribute(name)
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.get(element)?.text_content()
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}
