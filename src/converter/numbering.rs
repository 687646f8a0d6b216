use crate::model::Block;

/// Numbers each run of consecutive numbered list items from 1.
///
/// Any other block ends the run, so the next numbered item starts over.
pub fn number_list_items(blocks: &mut [Block]) {
    let mut counter = 0;
    for block in blocks.iter_mut() {
        match block {
            Block::NumberedListItem(item) => {
                counter += 1;
                item.number = Some(counter);
            }
            _ => counter = 0,
        }
    }
}
