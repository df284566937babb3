use super::model::{ColumnRule, DecodingRule};

/// Column holding the screenshot payload.
pub const IMAGE_COLUMN: &str = "image";
/// Column holding the ground-truth bounding box.
pub const BBOX_COLUMN: &str = "gt_bbox";

/// Column names that do not decode as text. Matching is exact and
/// case-sensitive; the first entry wins if a name were listed twice.
const SPECIAL_COLUMNS: &[(&str, DecodingRule)] = &[
    (IMAGE_COLUMN, DecodingRule::OpaqueBinary),
    (BBOX_COLUMN, DecodingRule::NumericSequence),
];

/// Rule for a single column name. Unknown names decode as text.
pub fn rule_for(name: &str) -> DecodingRule {
    SPECIAL_COLUMNS
        .iter()
        .find(|(special, _)| *special == name)
        .map(|(_, rule)| *rule)
        .unwrap_or(DecodingRule::Text)
}

/// Infer a decoding rule for every declared column, keeping the input order.
pub fn infer_schema<I, S>(names: I) -> Vec<ColumnRule>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            ColumnRule {
                name: name.to_string(),
                rule: rule_for(name),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_columns_get_their_rules() {
        assert_eq!(rule_for("image"), DecodingRule::OpaqueBinary);
        assert_eq!(rule_for("gt_bbox"), DecodingRule::NumericSequence);
        assert_eq!(rule_for("instruction"), DecodingRule::Text);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(rule_for("Image"), DecodingRule::Text);
        assert_eq!(rule_for("GT_BBOX"), DecodingRule::Text);
        assert_eq!(rule_for("image "), DecodingRule::Text);
    }

    #[test]
    fn empty_schema_is_empty() {
        assert!(infer_schema(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn inference_does_not_depend_on_order() {
        let forward = ["image", "history", "gt_bbox", "instruction"];
        let mut backward = forward;
        backward.reverse();

        let a = infer_schema(forward);
        let b = infer_schema(backward);
        for col in &a {
            let other = b.iter().find(|c| c.name == col.name).unwrap();
            assert_eq!(col.rule, other.rule);
        }
        assert_eq!(a[0].name, "image");
        assert_eq!(b[0].name, "instruction");
    }
}
