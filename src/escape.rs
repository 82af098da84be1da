/// Console escape table and the literal encode/decode pass

/// Token -> literal mapping used by the CloudWatch console inside the URL
/// fragment. The decode direction is authoritative; encoding is the exact
/// inverse. The tokens look like percent-encoding but are not: the console
/// prefixes them with `$` and double-encodes `/`, `[`, `]` and `"`, so the
/// strings below must be preserved bit-for-bit.
const DECODE_MAPPING: &[(&str, char)] = &[
    ("$3F", '?'),
    ("$3D", '='),
    ("$26", '&'),
    ("$252F", '/'),
    ("$255B", '['),
    ("$255D", ']'),
    ("$2522", '"'),
];

fn token_for(literal: char) -> Option<&'static str> {
    DECODE_MAPPING
        .iter()
        .find(|(_, ch)| *ch == literal)
        .map(|(token, _)| *token)
}

/// Encode a raw log-group or log-stream name for use in a console URL
/// fragment.
///
/// Every character present in the escape table is replaced by its token;
/// everything else passes through untouched. Tokens never contain a mapped
/// literal, so a single left-to-right scan cannot re-trigger on its own
/// output.
///
/// Examples:
/// - `/aws/lambda/my-fn` → `$252Faws$252Flambda$252Fmy-fn`
/// - `?filterPattern=a+b` → `$3FfilterPattern$3Da+b`
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for ch in s.chars() {
        match token_for(ch) {
            Some(token) => out.push_str(token),
            None => out.push(ch),
        }
    }

    out
}

/// Decode a console-escaped string back to its literal form.
///
/// Scans left to right; at each `$` the known tokens are tried and the first
/// match is consumed. A `$` that starts no known token is kept as-is, so
/// foreign input degrades to itself instead of failing.
pub fn decode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match DECODE_MAPPING
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            Some((token, ch)) => {
                out.push(*ch);
                rest = &rest[token.len()..];
            }
            None => {
                out.push('$');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
