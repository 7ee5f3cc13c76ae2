use std::rc::Rc;

use gpui::{
    AnyElement, App, ElementId, Global, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, Subscription, Window, div,
};
use serde::Serialize;
use smallvec::SmallVec;

use crate::ElementIdExt;

/// Caller-supplied analytics identity of a component.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_identifier: Option<SharedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_context: Option<SharedString>,
}

impl AnalyticsMetadata {
    pub fn new(instance_identifier: impl Into<SharedString>) -> Self {
        Self {
            instance_identifier: Some(instance_identifier.into()),
            error_context: None,
        }
    }

    pub fn error_context(mut self, error_context: impl Into<SharedString>) -> Self {
        self.error_context = Some(error_context.into());
        self
    }
}

/// Builder method for components that accept analytics metadata.
pub trait AnalyticsMetadataExt: Sized {
    fn analytics_metadata_mut(&mut self) -> &mut Option<AnalyticsMetadata>;

    fn analytics_metadata(mut self, metadata: AnalyticsMetadata) -> Self {
        *self.analytics_metadata_mut() = Some(metadata);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunnelEvent {
    SubStepStarted {
        sub_step: ElementId,
        metadata: Option<AnalyticsMetadata>,
    },
    SubStepCompleted {
        sub_step: ElementId,
        metadata: Option<AnalyticsMetadata>,
    },
}

pub trait FunnelObserver {
    fn funnel_event(&self, event: &FunnelEvent, cx: &mut App);
}

impl<F: Fn(&FunnelEvent, &mut App)> FunnelObserver for F {
    fn funnel_event(&self, event: &FunnelEvent, cx: &mut App) {
        (self)(event, cx)
    }
}

/// A multi-step user flow. While a `Funnel` global is installed, every
/// [`FunnelSubStep`] reports when the user starts interacting with it and
/// when the interaction moves on to another sub-step.
#[derive(Default)]
pub struct Funnel {
    observers: Vec<Rc<dyn FunnelObserver>>,
    current: Option<(ElementId, Option<AnalyticsMetadata>)>,
}

impl Global for Funnel {}

impl Funnel {
    pub fn start(cx: &mut App) {
        log::debug!(target: "gpui_facets::telemetry", "funnel started");
        cx.set_global(Funnel::default());
    }

    /// Ends the funnel, completing the sub-step in progress.
    pub fn end(cx: &mut App) {
        if !cx.has_global::<Funnel>() {
            return;
        }

        let (observers, current) = cx.update_global(|funnel: &mut Funnel, _cx| {
            (funnel.observers.clone(), funnel.current.take())
        });

        if let Some((sub_step, metadata)) = current {
            emit(&observers, &FunnelEvent::SubStepCompleted { sub_step, metadata }, cx);
        }

        cx.remove_global::<Funnel>();
        log::debug!(target: "gpui_facets::telemetry", "funnel ended");
    }

    pub fn is_active(cx: &App) -> bool {
        cx.has_global::<Funnel>()
    }

    /// Registers an observer on the active funnel. Does nothing when no funnel
    /// is active.
    pub fn observe(observer: impl FunnelObserver + 'static, cx: &mut App) {
        if cx.has_global::<Funnel>() {
            cx.global_mut::<Funnel>().observers.push(Rc::new(observer));
        }
    }

    pub fn current_sub_step(cx: &App) -> Option<&ElementId> {
        cx.try_global::<Funnel>()?
            .current
            .as_ref()
            .map(|(id, _)| id)
    }

    pub(crate) fn enter_sub_step(
        sub_step: &ElementId,
        metadata: Option<&AnalyticsMetadata>,
        cx: &mut App,
    ) {
        if !cx.has_global::<Funnel>() {
            return;
        }

        let Some((observers, previous)) = cx.update_global(|funnel: &mut Funnel, _cx| {
            if funnel.current.as_ref().is_some_and(|(id, _)| id == sub_step) {
                return None;
            }

            let previous = funnel
                .current
                .replace((sub_step.clone(), metadata.cloned()));
            Some((funnel.observers.clone(), previous))
        }) else {
            return;
        };

        if let Some((sub_step, metadata)) = previous {
            emit(&observers, &FunnelEvent::SubStepCompleted { sub_step, metadata }, cx);
        }

        emit(
            &observers,
            &FunnelEvent::SubStepStarted {
                sub_step: sub_step.clone(),
                metadata: metadata.cloned(),
            },
            cx,
        );
    }
}

fn emit(observers: &[Rc<dyn FunnelObserver>], event: &FunnelEvent, cx: &mut App) {
    log::debug!(target: "gpui_facets::telemetry", "{event:?}");

    for observer in observers {
        observer.funnel_event(event, cx);
    }
}

/// Marks its children as one step of the active [`Funnel`].
///
/// Pointer presses and focus moving inside the children start the sub-step.
/// Without an active funnel this is a plain wrapper.
#[derive(IntoElement)]
pub struct FunnelSubStep {
    id: ElementId,
    metadata: Option<AnalyticsMetadata>,
    children: SmallVec<[AnyElement; 2]>,
}

impl FunnelSubStep {
    pub fn new(id: impl Into<ElementId>, metadata: Option<AnalyticsMetadata>) -> Self {
        Self {
            id: id.into(),
            metadata,
            children: SmallVec::new(),
        }
    }
}

impl ParentElement for FunnelSubStep {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements)
    }
}

impl RenderOnce for FunnelSubStep {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let root = div()
            .id(self.id.with_suffix("funnel_sub_step"))
            .size_full()
            .children(self.children);

        if !Funnel::is_active(cx) {
            return root;
        }

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:funnel_focus_handle"),
                cx,
                |_window, cx| cx.focus_handle(),
            )
            .read(cx)
            .clone();

        let _focus_subscription = window.use_keyed_state(
            self.id.with_suffix("state:funnel_focus_subscription"),
            cx,
            {
                let id = self.id.clone();
                let metadata = self.metadata.clone();
                let focus_handle = focus_handle.clone();

                move |window, cx| -> Subscription {
                    window.on_focus_in(&focus_handle, cx, move |_window, cx| {
                        Funnel::enter_sub_step(&id, metadata.as_ref(), cx);
                    })
                }
            },
        );

        let id = self.id.clone();
        let metadata = self.metadata;

        root.track_focus(&focus_handle)
            .capture_any_mouse_down(move |_event, _window, cx| {
                Funnel::enter_sub_step(&id, metadata.as_ref(), cx);
            })
    }
}
