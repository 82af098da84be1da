/// Deep-link assembly and disassembly for the CloudWatch console
use url::Url;

use crate::escape::{decode, encode};
use crate::log_data::{CloudWatchInfo, CloudWatchQuery};

const CONSOLE_HOST: &str = "console.aws.amazon.com";
const CONSOLE_PATH: &str = "console.aws.amazon.com/cloudwatch/home";

/// Log-group name for a Lambda function, e.g. `/aws/lambda/my-fn`.
pub fn lambda_log_name(function_name: &str) -> String {
    format!("/aws/lambda/{function_name}")
}

/// Log-group name for an API Gateway execution log, e.g.
/// `API-Gateway-Execution-Logs_a4db3j/api`.
pub fn api_gateway_log_name(api_id: &str, stage: &str) -> String {
    format!("API-Gateway-Execution-Logs_{api_id}/{stage}")
}

/// Cheap check that a URL points at the CloudWatch console, for callers that
/// want to skip the full parse.
pub fn is_cloudwatch_url(url: &str) -> bool {
    url.contains(CONSOLE_PATH)
}

/// Build the `?start=...&end=...&filterPattern=...` segment of a deep link.
///
/// Segments come in a fixed order and a field that is absent, zero, or empty
/// is omitted entirely (the console treats `start=0` and "no start" the
/// same, and so does this builder). Spaces in the filter become literal `+`,
/// the console's query-string convention.
pub fn build_query_string(query: &CloudWatchQuery) -> String {
    let mut parts = Vec::new();

    if let Some(start) = query.start.filter(|&ts| ts != 0) {
        parts.push(format!("start={start}"));
    }
    if let Some(end) = query.end.filter(|&ts| ts != 0) {
        parts.push(format!("end={end}"));
    }
    if let Some(filter) = query.filter_pattern.as_deref().filter(|f| !f.is_empty()) {
        parts.push(format!("filterPattern={}", filter.replace(' ', "+")));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// Assemble the full console URL for a deep link.
///
/// The log name, the stream segment and the whole query string (including
/// its `?`, `=` and `&`) each go through the escape pass, matching how the
/// console itself escapes the fragment.
pub fn url_from_cloudwatch_info(info: &CloudWatchInfo) -> String {
    let encoded_log_name = encode(&info.log_name);
    let query_params = info.query.as_ref().map(build_query_string).unwrap_or_default();
    let encoded_query_params = encode(&query_params);
    let stream_path = match &info.stream_name {
        Some(stream) => format!("/{}", encode(stream)),
        None => String::new(),
    };

    format!(
        "https://{region}.{CONSOLE_PATH}?region={region}#logsV2:log-groups/log-group/{encoded_log_name}/log-events{stream_path}{encoded_query_params}",
        region = info.region,
    )
}

/// Recover the structured deep-link contents from an arbitrary URL.
///
/// Never fails: anything that is not a CloudWatch console URL comes back as
/// `{region: "", log_name: ""}`, a console URL without a log view as
/// `{region, log_name: ""}`, and partially-formed fragments degrade field by
/// field instead of erroring.
pub fn cloudwatch_info_from_url(url: &str) -> CloudWatchInfo {
    let Ok(parsed) = Url::parse(url) else {
        log::warn!("not a parseable URL: {url}");
        return CloudWatchInfo::new(String::new(), String::new());
    };

    let host = parsed.host_str().unwrap_or_default();
    if !host.contains(CONSOLE_HOST) {
        return CloudWatchInfo::new(String::new(), String::new());
    }

    let region = host
        .strip_suffix(&format!(".{CONSOLE_HOST}"))
        .unwrap_or(host)
        .to_string();

    let hash = parsed.fragment().unwrap_or_default();
    if hash.is_empty() {
        return CloudWatchInfo::new(region, String::new());
    }

    // Fragment shape: logsV2:log-groups/log-group/<log name>/log-events[/<stream>][?query]
    let hash_parts: Vec<&str> = hash.split('/').collect();
    let log_name = decode(hash_parts.get(2).copied().unwrap_or_default());

    // The last element is either "log-events" (list-of-streams view) or the
    // stream name, with the query string still glued on.
    let path_with_query = decode(hash_parts.last().copied().unwrap_or_default());
    let (path, query_string) = match path_with_query.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (path_with_query, String::new()),
    };

    let stream_name = (path != "log-events" && !path.is_empty()).then_some(path);
    let query = parse_query(&query_string);

    CloudWatchInfo {
        region,
        log_name,
        stream_name,
        query: query.is_some().then_some(query),
    }
}

/// Parse the decoded `key=value&...` query segment. Only `start`, `end` and
/// `filterPattern` are recognized; the first occurrence of each wins, and an
/// empty or unparsable value counts as absent.
fn parse_query(query_string: &str) -> CloudWatchQuery {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query_string.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let first = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    CloudWatchQuery {
        start: first("start").and_then(|value| value.parse().ok()),
        end: first("end").and_then(|value| value.parse().ok()),
        filter_pattern: first("filterPattern")
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<i64>, end: Option<i64>, filter: Option<&str>) -> CloudWatchQuery {
        CloudWatchQuery {
            start,
            end,
            filter_pattern: filter.map(str::to_string),
        }
    }

    #[test]
    fn test_lambda_log_name() {
        assert_eq!(lambda_log_name("my-fn"), "/aws/lambda/my-fn");
    }

    #[test]
    fn test_api_gateway_log_name() {
        assert_eq!(
            api_gateway_log_name("a4db3j", "api"),
            "API-Gateway-Execution-Logs_a4db3j/api"
        );
    }

    #[test]
    fn test_is_cloudwatch_url() {
        assert!(is_cloudwatch_url(
            "https://ap-southeast-1.console.aws.amazon.com/cloudwatch/home?region=ap-southeast-1"
        ));
        assert!(!is_cloudwatch_url("https://example.com/"));
        assert!(!is_cloudwatch_url(
            "https://ap-southeast-1.console.aws.amazon.com/s3/home"
        ));
    }

    #[test]
    fn test_build_query_string() {
        assert_eq!(build_query_string(&query(None, None, None)), "");
        assert_eq!(
            build_query_string(&query(Some(1), Some(2), None)),
            "?start=1&end=2"
        );
        assert_eq!(
            build_query_string(&query(None, None, Some("a b"))),
            "?filterPattern=a+b"
        );
        assert_eq!(
            build_query_string(&query(Some(1698508200000), None, Some("level error"))),
            "?start=1698508200000&filterPattern=level+error"
        );
    }

    #[test]
    fn zero_timestamps_are_omitted() {
        // start=0 is indistinguishable from "no start"; kept as documented
        // behavior of the query-string builder.
        assert_eq!(build_query_string(&query(Some(0), Some(0), None)), "");
        assert_eq!(build_query_string(&query(Some(0), Some(2), Some(""))), "?end=2");
    }

    #[test]
    fn test_url_from_info_basic() {
        let info = CloudWatchInfo::new("ap-southeast-1".to_string(), "/aws/lambda/my-fn".to_string());

        assert_eq!(
            url_from_cloudwatch_info(&info),
            "https://ap-southeast-1.console.aws.amazon.com/cloudwatch/home?region=ap-southeast-1\
             #logsV2:log-groups/log-group/$252Faws$252Flambda$252Fmy-fn/log-events"
        );
    }

    #[test]
    fn test_url_from_info_with_stream_and_query() {
        let info = CloudWatchInfo {
            region: "us-east-1".to_string(),
            log_name: "/aws/lambda/my-fn".to_string(),
            stream_name: Some("2024/01/01/[$LATEST]abc".to_string()),
            query: Some(query(Some(1), Some(2), Some("a b"))),
        };

        let url = url_from_cloudwatch_info(&info);

        assert!(url.contains("/log-events/2024$252F01$252F01$252F$255B$LATEST$255Dabc"));
        assert!(url.ends_with("$3Fstart$3D1$26end$3D2$26filterPattern$3Da+b"));
    }

    #[test]
    fn test_info_from_non_console_url() {
        let info = cloudwatch_info_from_url("https://example.com/");

        assert_eq!(info, CloudWatchInfo::new(String::new(), String::new()));
    }

    #[test]
    fn test_info_from_malformed_input() {
        for url in ["", "not a url", "https://", "#fragment-only"] {
            let info = cloudwatch_info_from_url(url);
            assert_eq!(info.region, "");
            assert_eq!(info.log_name, "");
        }
    }

    #[test]
    fn test_info_from_region_only_url() {
        let info = cloudwatch_info_from_url(
            "https://eu-west-1.console.aws.amazon.com/cloudwatch/home?region=eu-west-1",
        );

        assert_eq!(info.region, "eu-west-1");
        assert_eq!(info.log_name, "");
        assert!(info.stream_name.is_none());
        assert!(info.query.is_none());
    }

    #[test]
    fn test_info_from_log_group_url() {
        let info = cloudwatch_info_from_url(
            "https://ap-southeast-1.console.aws.amazon.com/cloudwatch/home?region=ap-southeast-1\
             #logsV2:log-groups/log-group/$252Faws$252Flambda$252Fmy-fn/log-events",
        );

        assert_eq!(info.region, "ap-southeast-1");
        assert_eq!(info.log_name, "/aws/lambda/my-fn");
        assert!(info.stream_name.is_none());
        assert!(info.query.is_none());
    }

    #[test]
    fn test_round_trip_all_fields() {
        let original = CloudWatchInfo {
            region: "ap-southeast-1".to_string(),
            log_name: "API-Gateway-Execution-Logs_a4db3j/api".to_string(),
            stream_name: Some("2024/01/01/[$LATEST]abc".to_string()),
            query: Some(query(Some(1698508200000), Some(1698511800000), Some("level error"))),
        };

        let round_tripped = cloudwatch_info_from_url(&url_from_cloudwatch_info(&original));

        assert_eq!(round_tripped, original);
    }

    #[test]
    fn test_round_trip_minimal() {
        let original = CloudWatchInfo::new("ap-southeast-1".to_string(), "/aws/lambda/my-fn".to_string());

        let round_tripped = cloudwatch_info_from_url(&url_from_cloudwatch_info(&original));

        assert_eq!(round_tripped, original);
    }

    #[test]
    fn test_filter_pattern_space_round_trip() {
        let original = CloudWatchInfo {
            region: "us-east-1".to_string(),
            log_name: "/aws/lambda/my-fn".to_string(),
            stream_name: None,
            query: Some(query(None, None, Some("a b"))),
        };

        let round_tripped = cloudwatch_info_from_url(&url_from_cloudwatch_info(&original));

        assert_eq!(
            round_tripped.query.unwrap().filter_pattern.as_deref(),
            Some("a b")
        );
    }

    #[test]
    fn test_empty_query_values_count_as_absent() {
        let info = cloudwatch_info_from_url(
            "https://us-east-1.console.aws.amazon.com/cloudwatch/home?region=us-east-1\
             #logsV2:log-groups/log-group/$252Faws$252Flambda$252Fmy-fn/log-events$3Fstart$3D$26end$3Dabc",
        );

        // start is empty, end is unparsable: both absent, so no query at all
        assert!(info.query.is_none());
    }

    #[test]
    fn test_trailing_slash_yields_no_stream() {
        let info = cloudwatch_info_from_url(
            "https://us-east-1.console.aws.amazon.com/cloudwatch/home?region=us-east-1\
             #logsV2:log-groups/log-group/$252Faws$252Flambda$252Fmy-fn/log-events/",
        );

        assert_eq!(info.log_name, "/aws/lambda/my-fn");
        assert!(info.stream_name.is_none());
    }

    #[test]
    fn test_truncated_fragment_degrades_to_empty_log_name() {
        let info = cloudwatch_info_from_url(
            "https://us-east-1.console.aws.amazon.com/cloudwatch/home#logsV2:log-groups",
        );

        assert_eq!(info.region, "us-east-1");
        assert_eq!(info.log_name, "");
    }
}
