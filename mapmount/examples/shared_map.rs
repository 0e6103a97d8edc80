//! Displays the shared map on one page, then moves it to a sidebar of another page.

use mapmount::host::MapHost;
use mapmount::mapmount_types::cartesian::Size;
use mapmount::shared;
use mapmount::tree::{ComponentTree, Style};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut tree = ComponentTree::new(Size::new(1280.0, 720.0));

    let full_page = tree.mount(MapHost::shared(), Style::fill());
    tree.frame();
    report(&tree, full_page);

    tree.unmount(full_page)?;

    let sidebar = tree.mount(MapHost::shared(), Style::fixed(320.0, 720.0));
    tree.frame();
    report(&tree, sidebar);

    tree.set_viewport(Size::new(1920.0, 1080.0));
    tree.frame();
    report(&tree, sidebar);

    tree.unmount(sidebar)?;
    Ok(())
}

fn report(tree: &ComponentTree, node: mapmount::tree::NodeId) {
    let map = shared::get();
    let map = map.read();
    let Some(surface) = tree.surface(node) else {
        return;
    };

    println!(
        "map at {:?} zoom {} ({:.0} m/px) is drawn to {} of size {:?}, {} frame(s)",
        map.view().center(),
        map.view().zoom(),
        map.view().resolution(),
        surface.id(),
        surface.size(),
        surface.frame_count(),
    );
}
