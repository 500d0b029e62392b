//! Provider wire types
//!
//! The provider's REST shape differs from what the proxy exposes: requests
//! are `{instances, parameters}` and finished operations nest their videos
//! under `generateVideoResponse.generatedSamples`. The conversions here keep
//! the proxy's own shape (`generatedVideos[].video.uri`) stable for callers.

use reel_core::domain::operation::{
    GeneratedVideo, Operation, OperationError, OperationResponse, VideoFile,
};
use reel_core::domain::request::{AspectRatio, Resolution};
use reel_core::dto::video::{GenerateVideoBody, ImageBytes, ReferenceType};
use serde::{Deserialize, Serialize};

/// Body of `POST models/{model}:predictLongRunning`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProviderImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_frame: Option<ProviderImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_images: Option<Vec<ProviderReference>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

impl From<&ImageBytes> for ProviderImage {
    fn from(image: &ImageBytes) -> Self {
        Self {
            bytes_base64_encoded: image.image_bytes.clone(),
            mime_type: image.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReference {
    pub image: ProviderImage,
    pub reference_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub sample_count: u32,
}

impl From<&GenerateVideoBody> for PredictRequest {
    fn from(body: &GenerateVideoBody) -> Self {
        let reference_images = body.reference_images.as_ref().map(|refs| {
            refs.iter()
                .map(|r| ProviderReference {
                    image: ProviderImage::from(&r.image),
                    reference_type: match r.reference_type {
                        ReferenceType::Asset => "asset".to_string(),
                        ReferenceType::Style => "style".to_string(),
                    },
                })
                .collect()
        });

        Self {
            instances: vec![Instance {
                prompt: body.prompt.clone(),
                image: body.image.as_ref().map(ProviderImage::from),
                last_frame: body.config.last_frame.as_ref().map(ProviderImage::from),
                reference_images,
            }],
            parameters: Parameters {
                aspect_ratio: body.config.aspect_ratio,
                resolution: body.config.resolution,
                sample_count: body.config.number_of_videos,
            },
        }
    }
}

/// Operation as returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ProviderResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<ProviderSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_media_filtered_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rai_media_filtered_reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<ProviderVideo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderVideo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl From<ProviderOperation> for Operation {
    fn from(op: ProviderOperation) -> Self {
        let response = op
            .response
            .and_then(|r| r.generate_video_response)
            .map(|r| OperationResponse {
                generated_videos: r
                    .generated_samples
                    .into_iter()
                    .map(|sample| GeneratedVideo {
                        video: sample.video.map(|v| VideoFile {
                            uri: v.uri,
                            mime_type: v.encoding,
                        }),
                    })
                    .collect(),
                rai_media_filtered_count: r.rai_media_filtered_count,
                rai_media_filtered_reasons: r.rai_media_filtered_reasons,
            });

        Operation {
            name: op.name,
            done: op.done,
            error: op.error,
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::domain::request::{GenerationRequest, VideoMode};
    use reel_core::prompt::build_generate_body;
    use serde_json::json;

    #[test]
    fn test_predict_request_from_frames_body() {
        let request = GenerationRequest::new(
            VideoMode::FramesToVideo,
            "sunrise",
            Resolution::P1080,
            AspectRatio::Landscape,
        )
        .with_start_frame("c3RhcnQ=")
        .with_looping(true);

        let predict = PredictRequest::from(&build_generate_body(&request));
        let json = serde_json::to_value(&predict).unwrap();

        assert_eq!(json["instances"][0]["image"]["bytesBase64Encoded"], "c3RhcnQ=");
        assert_eq!(json["instances"][0]["lastFrame"]["bytesBase64Encoded"], "c3RhcnQ=");
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
        assert_eq!(json["parameters"]["resolution"], "1080p");
        assert_eq!(json["parameters"]["sampleCount"], 1);
    }

    #[test]
    fn test_predict_request_tags_references_as_assets() {
        let request = GenerationRequest::new(
            VideoMode::ReferencesToVideo,
            "product shot",
            Resolution::P720,
            AspectRatio::Landscape,
        )
        .with_reference_image("YQ==");

        let predict = PredictRequest::from(&build_generate_body(&request));
        let refs = predict.instances[0].reference_images.as_ref().unwrap();
        assert_eq!(refs[0].reference_type, "asset");
    }

    #[test]
    fn test_finished_provider_operation_maps_to_proxy_shape() {
        let provider: ProviderOperation = serde_json::from_value(json!({
            "name": "models/veo/operations/op-1",
            "done": true,
            "response": {
                "@type": "type.googleapis.com/google.ai.generativelanguage.v1beta.PredictLongRunningResponse",
                "generateVideoResponse": {
                    "generatedSamples": [
                        { "video": { "uri": "https://files/abc:download?alt=media" } }
                    ]
                }
            }
        }))
        .unwrap();

        let op = Operation::from(provider);
        assert!(op.done);
        assert_eq!(op.video_uri(), Some("https://files/abc:download?alt=media"));

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json["response"]["generatedVideos"][0]["video"]["uri"],
            "https://files/abc:download?alt=media"
        );
    }

    #[test]
    fn test_provider_error_is_kept_verbatim() {
        let provider: ProviderOperation = serde_json::from_value(json!({
            "name": "models/veo/operations/op-1",
            "done": true,
            "error": { "code": 13, "message": "internal" }
        }))
        .unwrap();

        let op = Operation::from(provider);
        let error = op.error.unwrap();
        assert_eq!(error.code, 13);
        assert_eq!(error.message, "internal");
    }

    #[test]
    fn test_filtered_response_is_carried_over() {
        let provider: ProviderOperation = serde_json::from_value(json!({
            "name": "models/veo/operations/op-1",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "raiMediaFilteredCount": 1,
                    "raiMediaFilteredReasons": ["unsafe content"]
                }
            }
        }))
        .unwrap();

        let op = Operation::from(provider);
        assert!(op.is_content_filtered());
        assert_eq!(op.video_uri(), None);
    }
}
