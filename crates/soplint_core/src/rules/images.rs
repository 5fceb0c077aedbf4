use soplint_ast::{NodeType, TreeNode};

use super::RuleContext;
use crate::report::Reporter;

pub(super) fn check_image_paths<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let images_dir = &ctx.conventions.images_dir;
    for image in ctx.document.find_all(NodeType::Image) {
        let url = image.target().unwrap_or_default();
        if !url.contains(images_dir.as_str()) {
            reporter.error(format!(
                "Image '{}' must be stored in the '{}' directory.",
                url, images_dir
            ));
        }
    }
}
