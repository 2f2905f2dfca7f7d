use super::pending::PendingRelationship;
use crate::error::DecodeError;
use crate::node::*;
use ahash::AHashMap;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Defines the contract for decoding one node type tag into a `NodeKind`.
///
/// A decoder reads the inline fields of the node object itself. Fields that
/// reference other nodes by ID are never looked up here; they are recorded
/// in `pending` for the resolver.
pub trait NodeDecoder: Send + Sync {
    fn type_name(&self) -> &str;
    fn decode(
        &self,
        node_id: &str,
        object: &JsonValue,
        pending: &mut Vec<PendingRelationship>,
    ) -> Result<NodeKind, DecodeError>;
}

/// Registers the ID-reference fields a payload type carries.
trait ReferenceFields {
    fn register(
        _node_id: &str,
        _object: &JsonValue,
        _pending: &mut Vec<PendingRelationship>,
    ) -> Result<(), DecodeError> {
        Ok(())
    }
}

macro_rules! without_references {
    ( $( $payload:ty ),* $(,)? ) => {
        $( impl ReferenceFields for $payload {} )*
    };
}

without_references!(
    Screen,
    NavBar,
    NavBarButton,
    Collection,
    DataSource,
    Stack,
    ZStack,
    Image,
    Icon,
    Text,
    Rectangle,
    ScrollContainer,
    Spacer,
    Divider,
    WebView,
    Carousel,
    Video,
    Audio,
);

impl ReferenceFields for PageControl {
    fn register(
        node_id: &str,
        object: &JsonValue,
        pending: &mut Vec<PendingRelationship>,
    ) -> Result<(), DecodeError> {
        if let Some(carousel_id) = optional_id(node_id, "PageControl", object, "carouselID")? {
            pending.push(
                PendingRelationship::one_to_one(node_id, RelationField::Carousel, carousel_id)
                    .with_inverse(RelationField::PageControl),
            );
        }
        Ok(())
    }
}

/// Reads an optional ID-reference field, failing when it is present but not a string.
pub(super) fn optional_id(
    node_id: &str,
    type_name: &str,
    object: &JsonValue,
    field: &str,
) -> Result<Option<NodeId>, DecodeError> {
    match object.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(id)) => Ok(Some(id.clone())),
        Some(other) => Err(DecodeError::InvalidField {
            node_id: node_id.to_string(),
            type_name: type_name.to_string(),
            message: format!("'{}' must be a node ID string, found {}", field, other),
        }),
    }
}

/// Deserializes a payload from the node object, mapping serde failures onto decode errors.
pub(super) fn decode_payload<T: DeserializeOwned>(
    node_id: &str,
    type_name: &str,
    object: &JsonValue,
) -> Result<T, DecodeError> {
    T::deserialize(object).map_err(|e| {
        let message = e.to_string();
        match missing_field_name(&message) {
            Some(field) => DecodeError::MissingField {
                node_id: node_id.to_string(),
                field,
            },
            None => DecodeError::InvalidField {
                node_id: node_id.to_string(),
                type_name: type_name.to_string(),
                message,
            },
        }
    })
}

fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next().map(str::to_string)
}

/// Master macro to define all standard node decoders, their registration, and their creation.
macro_rules! define_node_decoders {
    ( $( ($struct_name:ident, $type_name:literal, $payload:ty, $variant:path) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl NodeDecoder for $struct_name {
                fn type_name(&self) -> &str { $type_name }
                fn decode(
                    &self,
                    node_id: &str,
                    object: &JsonValue,
                    pending: &mut Vec<PendingRelationship>,
                ) -> Result<NodeKind, DecodeError> {
                    let payload: $payload = decode_payload(node_id, $type_name, object)?;
                    <$payload as ReferenceFields>::register(node_id, object, pending)?;
                    Ok($variant(payload))
                }
            }
        )*

        pub(super) fn register_default_decoders(registry: &mut AHashMap<String, Box<dyn NodeDecoder>>) {
            $( registry.insert($type_name.to_string(), Box::new($struct_name)); )*
        }

        pub(super) fn create_decoder_by_name(name: &str) -> Option<Box<dyn NodeDecoder>> {
            match name {
                $( $type_name => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_node_decoders! {
    (ScreenDecoder, "Screen", Screen, NodeKind::Screen),
    (NavBarDecoder, "NavBar", NavBar, NodeKind::NavBar),
    (NavBarButtonDecoder, "NavBarButton", NavBarButton, NodeKind::NavBarButton),
    (CollectionDecoder, "Collection", Collection, NodeKind::Collection),
    (DataSourceDecoder, "DataSource", DataSource, NodeKind::DataSource),
    (HStackDecoder, "HStack", Stack, NodeKind::HStack),
    (VStackDecoder, "VStack", Stack, NodeKind::VStack),
    (ZStackDecoder, "ZStack", ZStack, NodeKind::ZStack),
    (ImageDecoder, "Image", Image, NodeKind::Image),
    (IconDecoder, "Icon", Icon, NodeKind::Icon),
    (TextDecoder, "Text", Text, NodeKind::Text),
    (RectangleDecoder, "Rectangle", Rectangle, NodeKind::Rectangle),
    (ScrollContainerDecoder, "ScrollContainer", ScrollContainer, NodeKind::ScrollContainer),
    (SpacerDecoder, "Spacer", Spacer, NodeKind::Spacer),
    (DividerDecoder, "Divider", Divider, NodeKind::Divider),
    (WebViewDecoder, "WebView", WebView, NodeKind::WebView),
    (CarouselDecoder, "Carousel", Carousel, NodeKind::Carousel),
    (PageControlDecoder, "PageControl", PageControl, NodeKind::PageControl),
    (VideoDecoder, "Video", Video, NodeKind::Video),
    (AudioDecoder, "Audio", Audio, NodeKind::Audio),
}
