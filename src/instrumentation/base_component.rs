use std::{
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use gpui::{App, ElementId, Global, SharedString, Window};
use serde::Serialize;
use serde_json::Value;

use crate::{ElementIdExt, instrumentation::AnalyticsMetadata};

const TELEMETRY_TARGET: &str = "gpui_facets::telemetry";

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one mounted component for as long as its element keeps rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentInstanceId(u64);

impl ComponentInstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The configuration a component reports when it mounts.
#[derive(Serialize)]
pub struct ComponentConfiguration<P: Serialize> {
    pub props: P,
}

/// Reported once per component instance.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMount {
    pub instance_id: u64,
    pub component_name: SharedString,
    pub configuration: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_metadata: Option<AnalyticsMetadata>,
}

/// Receives component mounts. Register with [`ComponentTelemetry::observe`].
pub trait ComponentMetrics {
    fn component_mounted(&self, mount: &ComponentMount, cx: &mut App);
}

impl<F: Fn(&ComponentMount, &mut App)> ComponentMetrics for F {
    fn component_mounted(&self, mount: &ComponentMount, cx: &mut App) {
        (self)(mount, cx)
    }
}

#[derive(Default)]
pub struct ComponentTelemetry {
    observers: Vec<Rc<dyn ComponentMetrics>>,
}

impl Global for ComponentTelemetry {}

impl ComponentTelemetry {
    pub fn observe(observer: impl ComponentMetrics + 'static, cx: &mut App) {
        cx.default_global::<ComponentTelemetry>()
            .observers
            .push(Rc::new(observer));
    }

    fn report(mount: &ComponentMount, cx: &mut App) {
        match serde_json::to_string(mount) {
            Ok(json) => log::debug!(target: TELEMETRY_TARGET, "{json}"),
            Err(err) => log::debug!(
                target: TELEMETRY_TARGET,
                "{} #{} mounted ({err})",
                mount.component_name,
                mount.instance_id
            ),
        }

        let observers = cx
            .try_global::<ComponentTelemetry>()
            .map(|telemetry| telemetry.observers.clone())
            .unwrap_or_default();

        for observer in observers {
            observer.component_mounted(mount, cx);
        }
    }
}

/// Identity shared by every instrumented component.
#[derive(Clone, Debug)]
pub struct BaseComponentProps {
    pub instance_id: ComponentInstanceId,
    pub component_name: &'static str,
}

impl BaseComponentProps {
    /// Attributes identifying the component on its root element.
    pub fn attributes(&self) -> [(SharedString, SharedString); 2] {
        [
            ("data-component".into(), self.component_name.into()),
            ("data-instance-id".into(), self.instance_id.to_string().into()),
        ]
    }
}

struct BaseComponentState {
    instance_id: ComponentInstanceId,
    reported: bool,
}

/// Assigns `id` a stable instance identity and reports its configuration the
/// first time it renders.
pub fn use_base_component<P: Serialize>(
    id: &ElementId,
    component_name: &'static str,
    configuration: ComponentConfiguration<P>,
    analytics_metadata: Option<&AnalyticsMetadata>,
    window: &mut Window,
    cx: &mut App,
) -> BaseComponentProps {
    let state = window.use_keyed_state(
        id.with_suffix("state:base_component"),
        cx,
        |_window, _cx| BaseComponentState {
            instance_id: ComponentInstanceId::next(),
            reported: false,
        },
    );

    let (instance_id, reported) = {
        let state = state.read(cx);
        (state.instance_id, state.reported)
    };

    if !reported {
        state.update(cx, |state, _cx| state.reported = true);

        let configuration = serde_json::to_value(&configuration).unwrap_or_else(|err| {
            log::warn!("could not serialize {component_name} configuration: {err}");
            Value::Null
        });

        let mount = ComponentMount {
            instance_id: instance_id.as_u64(),
            component_name: component_name.into(),
            configuration,
            analytics_metadata: analytics_metadata.cloned(),
        };

        ComponentTelemetry::report(&mount, cx);
    }

    BaseComponentProps {
        instance_id,
        component_name,
    }
}


#[cfg(all(test, feature = "test-support"))]
mod gpui_tests {
    use std::cell::RefCell;

    use super::*;
    use gpui::{
        AppContext, Context, IntoElement, Render, TestAppContext, VisualTestContext, div,
    };

    struct Instrumented {
        renders: usize,
    }

    impl Render for Instrumented {
        fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
            self.renders += 1;

            use_base_component(
                &ElementId::from("probe"),
                "Probe",
                ComponentConfiguration {
                    props: serde_json::json!({ "renders": self.renders }),
                },
                None,
                window,
                cx,
            );

            div()
        }
    }

    #[gpui::test]
    fn test_mount_is_reported_once(cx: &mut TestAppContext) {
        let mounts = Rc::new(RefCell::new(Vec::<ComponentMount>::new()));

        cx.update({
            let mounts = mounts.clone();
            |cx| {
                ComponentTelemetry::observe(
                    move |mount: &ComponentMount, _cx: &mut App| {
                        mounts.borrow_mut().push(mount.clone())
                    },
                    cx,
                )
            }
        });

        let window = cx
            .update(|cx| {
                cx.open_window(Default::default(), |_window, cx| {
                    cx.new(|_cx| Instrumented { renders: 0 })
                })
            })
            .unwrap();

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        window
            .update(&mut vcx, |_view, _window, cx| cx.notify())
            .unwrap();
        vcx.run_until_parked();

        let mounts = mounts.borrow();
        assert_eq!(mounts.len(), 1, "A re-render must not report again");
        assert_eq!(mounts[0].component_name, SharedString::from("Probe"));
        assert_eq!(mounts[0].configuration["props"]["renders"], 1);
    }
}
