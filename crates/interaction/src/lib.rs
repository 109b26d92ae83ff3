//! DOM-free interaction controllers for page-fx
//!
//! Each controller owns the state of one behavior (a tooltip, the active
//! navigation link, a count-up animation, ...) and answers events with a list
//! of [`Effect`](page_fx_shared::Effect)s. [`PageController`] wires them
//! together for a whole page; the browser bridge only discovers elements,
//! forwards events and applies effects.

pub mod bindings;
pub mod diagram;
pub mod drawer;
pub mod hover;
pub mod layout;
pub mod navigation;
pub mod page;
pub mod progress;
pub mod readout;
pub mod sections;
pub mod stat_animation;
pub mod surface;
pub mod throttle;
pub mod tooltip;
pub mod visibility;

pub use bindings::{Binding, BindingTable, BindingTarget, Handler, Observation};
pub use diagram::DiagramTooltip;
pub use layout::{DiagramLayout, LinkElement, PageLayout, ReadoutLayout, SectionElement, StatCard};
pub use page::PageController;
pub use readout::ReadoutElements;
pub use sections::{ActiveSectionIndicator, NavSection, Switch};
pub use stat_animation::{ease_out_quart, StatAnimation, StatRules};
pub use surface::Surface;
pub use throttle::FrameThrottle;
pub use tooltip::TooltipController;
pub use visibility::{RevealAction, RevealState, VisibilityTrigger};
