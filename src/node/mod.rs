pub mod kinds;
pub mod relation;

pub use kinds::*;
pub use relation::*;

use serde::Deserialize;
use std::fmt;

/// Document-unique identifier of a node.
pub type NodeId = String;

/// One element of the UI tree.
///
/// Ownership lives in the document's flat node table: `children`, `parent`,
/// `mask` and every cross-link are plain IDs looked up on demand, so there
/// is never a second owning edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: Option<String>,
    /// Child IDs in authoring order. Order determines traversal and z-order.
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Inline mask node, decoded together with its owner.
    pub mask: Option<NodeId>,
    pub action: Option<Action>,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            children: Vec::new(),
            parent: None,
            mask: None,
            action: None,
            kind,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// The type-specific payload of a node, one variant per node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Screen(Screen),
    NavBar(NavBar),
    NavBarButton(NavBarButton),
    Collection(Collection),
    DataSource(DataSource),
    HStack(Stack),
    VStack(Stack),
    ZStack(ZStack),
    Image(Image),
    Icon(Icon),
    Text(Text),
    Rectangle(Rectangle),
    ScrollContainer(ScrollContainer),
    Spacer(Spacer),
    Divider(Divider),
    WebView(WebView),
    Carousel(Carousel),
    PageControl(PageControl),
    Video(Video),
    Audio(Audio),
}

impl NodeKind {
    /// The discriminator this kind is decoded from.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Screen(_) => "Screen",
            NodeKind::NavBar(_) => "NavBar",
            NodeKind::NavBarButton(_) => "NavBarButton",
            NodeKind::Collection(_) => "Collection",
            NodeKind::DataSource(_) => "DataSource",
            NodeKind::HStack(_) => "HStack",
            NodeKind::VStack(_) => "VStack",
            NodeKind::ZStack(_) => "ZStack",
            NodeKind::Image(_) => "Image",
            NodeKind::Icon(_) => "Icon",
            NodeKind::Text(_) => "Text",
            NodeKind::Rectangle(_) => "Rectangle",
            NodeKind::ScrollContainer(_) => "ScrollContainer",
            NodeKind::Spacer(_) => "Spacer",
            NodeKind::Divider(_) => "Divider",
            NodeKind::WebView(_) => "WebView",
            NodeKind::Carousel(_) => "Carousel",
            NodeKind::PageControl(_) => "PageControl",
            NodeKind::Video(_) => "Video",
            NodeKind::Audio(_) => "Audio",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} '{}' ({})", self.type_name(), name, self.id),
            None => write!(f, "{} ({})", self.type_name(), self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegueStyle {
    #[default]
    Push,
    Modal,
}

/// What happens when the user taps a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Navigate to another screen. `screen` is wired by the resolver.
    PerformSegue {
        screen: Option<NodeId>,
        style: SegueStyle,
    },
    OpenUrl {
        url: String,
    },
    PresentWebsite {
        url: String,
    },
    Close,
    Custom {
        identifier: Option<String>,
    },
}
