use gpui::{
    AnyElement, App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    Styled, Window, div, prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    ElementIdExt,
    extensions::external_props::{ExternalProps, ExternalPropsExt, external_root},
    instrumentation::{
        AnalyticsMetadata, AnalyticsMetadataExt, ComponentConfiguration, FunnelSubStep,
        use_base_component,
    },
    theme::{ThemeExt, ThemeLayerKind},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerVariant {
    #[default]
    Default,
    /// Drops the outer corner radius so consecutive containers stack into one
    /// block.
    Stacked,
}

/// A framed panel with a header, content and an optional footer.
#[derive(IntoElement)]
pub struct Container {
    id: ElementId,
    header: Option<AnyElement>,
    footer: Option<AnyElement>,
    children: SmallVec<[AnyElement; 2]>,
    variant: ContainerVariant,
    layer: ThemeLayerKind,
    disable_header_paddings: bool,
    disable_content_paddings: bool,
    fit_height: bool,
    analytics_metadata: Option<AnalyticsMetadata>,
    external_props: ExternalProps,
}

impl Container {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            header: None,
            footer: None,
            children: SmallVec::new(),
            variant: ContainerVariant::default(),
            layer: ThemeLayerKind::Secondary,
            disable_header_paddings: false,
            disable_content_paddings: false,
            fit_height: false,
            analytics_metadata: None,
            external_props: ExternalProps::default(),
        }
    }

    pub fn header(mut self, header: impl IntoElement) -> Self {
        self.header = Some(header.into_any_element());
        self
    }

    pub fn footer(mut self, footer: impl IntoElement) -> Self {
        self.footer = Some(footer.into_any_element());
        self
    }

    pub fn variant(mut self, variant: ContainerVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn disable_header_paddings(mut self, disable: bool) -> Self {
        self.disable_header_paddings = disable;
        self
    }

    pub fn disable_content_paddings(mut self, disable: bool) -> Self {
        self.disable_content_paddings = disable;
        self
    }

    /// Stretches the container to its parent's height, scrolling the content
    /// when it overflows.
    pub fn fit_height(mut self, fit_height: bool) -> Self {
        self.fit_height = fit_height;
        self
    }
}

impl ParentElement for Container {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements)
    }
}

impl ExternalPropsExt for Container {
    fn external_props_mut(&mut self) -> &mut ExternalProps {
        &mut self.external_props
    }
}

impl AnalyticsMetadataExt for Container {
    fn analytics_metadata_mut(&mut self) -> &mut Option<AnalyticsMetadata> {
        &mut self.analytics_metadata
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerTelemetry {
    disable_content_paddings: bool,
    disable_header_paddings: bool,
    fit_height: bool,
    variant: ContainerVariant,
}

impl RenderOnce for Container {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let padding = theme.layout.padding.lg;
        let corner_radius = match self.variant {
            ContainerVariant::Default => theme.layout.corner_radii.lg,
            ContainerVariant::Stacked => px(0.),
        };
        let border_width = theme.layout.border_width;
        let text_color = theme.variants.active(cx).colors.text.primary;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);

        let base_component = use_base_component(
            &self.id,
            "Container",
            ComponentConfiguration {
                props: ContainerTelemetry {
                    disable_content_paddings: self.disable_content_paddings,
                    disable_header_paddings: self.disable_header_paddings,
                    fit_height: self.fit_height,
                    variant: self.variant,
                },
            },
            self.analytics_metadata.as_ref(),
            window,
            cx,
        );

        let has_header = self.header.is_some();

        let root = external_root(
            &self.id,
            &self.external_props,
            base_component.attributes(),
            window,
            cx,
        )
        .relative()
        .flex()
        .flex_col()
        .w_full()
        .text_color(text_color)
        .when(self.fit_height, |this| this.h_full())
        .child(
            squircle()
                .absolute_expand()
                .rounded(corner_radius)
                .bg(background_color)
                .border(border_width)
                .border_inside()
                .border_color(border_color),
        )
        .when_some(self.header, |this, header| {
            this.child(
                div()
                    .id(self.id.with_suffix("header"))
                    .flex()
                    .flex_none()
                    .w_full()
                    .when(!self.disable_header_paddings, |this| this.p(padding))
                    .child(header),
            )
        })
        .child(
            div()
                .id(self.id.with_suffix("content"))
                .flex()
                .flex_col()
                .w_full()
                .when(!self.disable_content_paddings, |this| {
                    this.px(padding)
                        .pb(padding)
                        .when(!has_header, |this| this.pt(padding))
                })
                .when(self.fit_height, |this| {
                    this.flex_1().min_h(px(0.)).overflow_y_scroll()
                })
                .children(self.children),
        )
        .when_some(self.footer, |this, footer| {
            this.child(
                div()
                    .id(self.id.with_suffix("footer"))
                    .flex()
                    .flex_none()
                    .w_full()
                    .border_t(border_width)
                    .border_color(border_color)
                    .p(padding)
                    .child(footer),
            )
        });

        FunnelSubStep::new(self.id.clone(), self.analytics_metadata).child(root)
    }
}
