/// Data structures for CloudWatch Log Opener
use serde::{Deserialize, Serialize};

/// The decoded contents of a CloudWatch console deep link.
///
/// `log_name` and `stream_name` are always stored in literal (unescaped)
/// form; escaping happens only while assembling a URL and is stripped while
/// disassembling one. Empty `region`/`log_name` are the "unknown" sentinels,
/// never a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudWatchInfo {
    pub region: String,
    #[serde(rename = "logName")]
    pub log_name: String,
    #[serde(rename = "streamName", skip_serializing_if = "Option::is_none")]
    pub stream_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<CloudWatchQuery>,
}

impl CloudWatchInfo {
    pub fn new(region: String, log_name: String) -> CloudWatchInfo {
        CloudWatchInfo {
            region,
            log_name,
            stream_name: None,
            query: None,
        }
    }
}

/// Time range and filter carried in the query segment of a deep link.
///
/// `start`/`end` are millisecond epoch timestamps, treated as opaque
/// integers. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudWatchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(rename = "filterPattern", skip_serializing_if = "Option::is_none")]
    pub filter_pattern: Option<String>,
}

impl CloudWatchQuery {
    /// True when at least one field is set.
    pub fn is_some(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.filter_pattern.is_some()
    }
}

/// A saved log destination shown in the popup's suggestion list.
///
/// Serialized untagged so the stored JSON stays plain records, compatible
/// with hand-written import files. Variants are ordered most-specific first:
/// a `{api, lambda}` record must not fall into `Lambda`, whose `name` field
/// is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CloudwatchLogItem {
    Gateway {
        #[serde(rename = "gatewayName")]
        gateway_name: String,
        #[serde(rename = "gatewayId")]
        gateway_id: String,
        stage: String,
    },
    Api {
        api: String,
        lambda: String,
    },
    Lambda {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        lambda: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_creation() {
        let info = CloudWatchInfo::new("ap-southeast-1".to_string(), "/aws/lambda/my-fn".to_string());

        assert_eq!(info.region, "ap-southeast-1");
        assert_eq!(info.log_name, "/aws/lambda/my-fn");
        assert!(info.stream_name.is_none());
        assert!(info.query.is_none());
    }

    #[test]
    fn test_query_is_some() {
        assert!(!CloudWatchQuery::default().is_some());
        assert!(CloudWatchQuery {
            start: Some(1698508200000),
            ..Default::default()
        }
        .is_some());
        assert!(CloudWatchQuery {
            filter_pattern: Some("error".to_string()),
            ..Default::default()
        }
        .is_some());
    }

    #[test]
    fn test_info_serialization() {
        let info = CloudWatchInfo {
            region: "ap-southeast-1".to_string(),
            log_name: "/aws/lambda/my-fn".to_string(),
            stream_name: Some("2024/01/01/[$LATEST]abc".to_string()),
            query: Some(CloudWatchQuery {
                start: Some(1698508200000),
                end: None,
                filter_pattern: Some("level error".to_string()),
            }),
        };

        let json = serde_json::to_string(&info).unwrap();
        let deserialized: CloudWatchInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, info);
        // Absent optionals are omitted, not serialized as null
        assert!(!json.contains("\"end\""));
    }

    #[test]
    fn test_item_variants_from_stored_json() {
        let json = r#"[
            { "name": "Create statement", "lambda": "orders-create-statement" },
            { "lambda": "orders-transfer-request" },
            { "lambda": "auth-exists-qr", "api": "/v1/auth/signup-status" },
            { "gatewayName": "shop-backend", "gatewayId": "a4db3j", "stage": "api" }
        ]"#;

        let items: Vec<CloudwatchLogItem> = serde_json::from_str(json).unwrap();

        assert!(matches!(&items[0], CloudwatchLogItem::Lambda { name: Some(n), .. } if n == "Create statement"));
        assert!(matches!(&items[1], CloudwatchLogItem::Lambda { name: None, lambda } if lambda == "orders-transfer-request"));
        assert!(matches!(&items[2], CloudwatchLogItem::Api { api, .. } if api == "/v1/auth/signup-status"));
        assert!(matches!(&items[3], CloudwatchLogItem::Gateway { gateway_id, .. } if gateway_id == "a4db3j"));
    }

    #[test]
    fn test_item_round_trip() {
        let items = vec![
            CloudwatchLogItem::Lambda {
                name: None,
                lambda: "orders-transfer-request".to_string(),
            },
            CloudwatchLogItem::Api {
                api: "/v1/auth/signup-status".to_string(),
                lambda: "auth-exists-qr".to_string(),
            },
            CloudwatchLogItem::Gateway {
                gateway_name: "shop-backend".to_string(),
                gateway_id: "a4db3j".to_string(),
                stage: "api".to_string(),
            },
        ];

        let json = serde_json::to_string(&items).unwrap();
        let deserialized: Vec<CloudwatchLogItem> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, items);
    }
}
