use super::NodeId;
use crate::query::{Condition, Limit, SortDescriptor};
use serde::Deserialize;

/// An sRGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusBarStyle {
    #[default]
    Default,
    Light,
    Dark,
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(default)]
    pub status_bar_style: StatusBarStyle,
    pub background_color: Option<Color>,
    /// Nodes whose segue action targets this screen. Filled by the resolver.
    #[serde(skip)]
    pub segue_sources: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleDisplayMode {
    #[default]
    Inline,
    Large,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavBar {
    pub title: String,
    #[serde(default)]
    pub title_display_mode: TitleDisplayMode,
    #[serde(default)]
    pub hides_back_button: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonPlacement {
    #[default]
    Leading,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    #[default]
    Custom,
    Done,
    Close,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavBarButton {
    #[serde(default)]
    pub placement: ButtonPlacement,
    #[serde(default)]
    pub style: ButtonStyle,
    pub title: Option<String>,
    pub icon: Option<String>,
}

/// A repeating container whose items come from runtime data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub key_path: String,
    #[serde(default)]
    pub filters: Vec<Condition>,
    #[serde(default)]
    pub sort_descriptors: Vec<SortDescriptor>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Describes where a subtree's runtime data is fetched from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub url: String,
    #[serde(default)]
    pub http_method: HttpMethod,
    #[serde(default)]
    pub headers: Vec<Header>,
    pub http_body: Option<String>,
    /// Seconds between refreshes, if the host should poll.
    pub poll_interval: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Center,
    Leading,
    Trailing,
    Top,
    Bottom,
    TopLeading,
    TopTrailing,
    BottomLeading,
    BottomTrailing,
    FirstTextBaseline,
    LastTextBaseline,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ZStack {
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizingMode {
    #[default]
    ScaleToFit,
    ScaleToFill,
    Stretch,
    Tile,
    OriginalSize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(rename = "darkModeURL")]
    pub dark_mode_url: Option<String>,
    #[serde(default)]
    pub resizing_mode: ResizingMode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub symbol_name: String,
    pub point_size: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

/// A run of text. `text` may contain `{{ }}` template spans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    #[serde(default)]
    pub text_alignment: TextAlignment,
    pub line_limit: Option<u32>,
    pub text_color: Option<Color>,
    #[serde(default)]
    pub transform: TextTransform,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub fill: Option<Color>,
    #[serde(default)]
    pub corner_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollContainer {
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub disable_scroll_bar: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub background_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebViewSource {
    Url(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebView {
    pub source: WebViewSource,
    #[serde(default = "default_true")]
    pub is_scroll_enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    #[serde(default)]
    pub is_loop_enabled: bool,
    /// The page control observing this carousel. Filled by the resolver.
    #[serde(skip)]
    pub page_control: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageControlStyle {
    #[default]
    Default,
    Light,
    Dark,
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageControl {
    #[serde(default)]
    pub style: PageControlStyle,
    /// The carousel this control tracks, wired from `carouselID` by the resolver.
    #[serde(skip)]
    pub carousel: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    #[serde(rename = "posterImageURL")]
    pub poster_image_url: Option<String>,
    #[serde(default)]
    pub resizing_mode: ResizingMode,
    #[serde(default = "default_true")]
    pub show_controls: bool,
    #[serde(default)]
    pub auto_play: bool,
    #[serde(default)]
    pub remove_audio: bool,
    #[serde(default)]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audio {
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    #[serde(default)]
    pub auto_play: bool,
    #[serde(default)]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Spacer {}
