//! Dangerous-object screening over detector output.

use wardsight_core::ObjectDetection;

/// Label substrings that mark a detection as dangerous.
pub const DANGEROUS_LABELS: [&str; 5] = ["knife", "scissors", "gun", "weapon", "bottle"];

/// Filter detections down to dangerous-object labels.
///
/// Matching is case-insensitive on substrings, so a detector label of
/// "Kitchen Knife" matches "knife". Duplicate labels are dropped keeping
/// the first occurrence, preserving detection order.
#[must_use]
pub fn screen_dangerous_objects(detections: &[ObjectDetection]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();

    for detection in detections {
        let lower = detection.label.to_lowercase();
        if !DANGEROUS_LABELS.iter().any(|danger| lower.contains(danger)) {
            continue;
        }
        if labels.iter().any(|seen| seen == &detection.label) {
            continue;
        }
        labels.push(detection.label.clone());
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(label: &str) -> ObjectDetection {
        ObjectDetection::new(label, 0.9, [0.1, 0.1, 0.3, 0.3])
    }

    #[test]
    fn benign_objects_pass() {
        let detections = vec![detection("person"), detection("chair"), detection("cup")];
        assert!(screen_dangerous_objects(&detections).is_empty());
    }

    #[test]
    fn knife_is_flagged() {
        let detections = vec![detection("person"), detection("knife")];
        assert_eq!(screen_dangerous_objects(&detections), vec!["knife"]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let detections = vec![detection("Kitchen Knife"), detection("SCISSORS")];
        assert_eq!(
            screen_dangerous_objects(&detections),
            vec!["Kitchen Knife", "SCISSORS"],
        );
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let detections = vec![detection("knife"), detection("bottle"), detection("knife")];
        assert_eq!(screen_dangerous_objects(&detections), vec!["knife", "bottle"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(screen_dangerous_objects(&[]).is_empty());
    }
}
