//! Tests for connected-component extraction and subgrid round trips

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::grid::Cell;
    use gridrule::grid::objects::{embed_subgrid, extract_objects, object_subgrid};

    // Tests objects are 4-connected and split by value
    // Verified by adding diagonal neighbours to the flood fill
    #[test]
    fn test_four_connectivity() {
        let grid = fixture(&[&[1, 0, 1], &[0, 1, 0], &[2, 2, 0]]);
        let objects = extract_objects(&grid);

        assert_eq!(objects.len(), 4);
        assert!(objects.iter().all(|o| o.value != 0));
        let twos: Vec<_> = objects.iter().filter(|o| o.value == 2).collect();
        assert_eq!(twos.len(), 1);
        assert_eq!(twos.first().map(|o| o.size()), Some(2));
    }

    // Tests objects appear in row-major seed order
    // Verified by scanning columns first
    #[test]
    fn test_seed_order() {
        let grid = fixture(&[&[0, 0, 3], &[4, 0, 3], &[4, 0, 0]]);
        let values: Vec<u8> = extract_objects(&grid).iter().map(|o| o.value).collect();
        assert_eq!(values, vec![3, 4]);
    }

    // Tests attributes: bounds, dimensions and centroid
    // Verified by using the bounding-box center instead of the centroid
    #[test]
    fn test_object_attributes() {
        let grid = fixture(&[&[5, 5, 5], &[5, 0, 0], &[0, 0, 0]]);
        let objects = extract_objects(&grid);
        let object = objects.first().unwrap();

        assert_eq!(object.size(), 4);
        assert_eq!(object.bounds.min, Cell::new(0, 0));
        assert_eq!(object.bounds.max, Cell::new(1, 2));
        assert_eq!(object.dimensions(), (2, 3));
        assert!((object.center.0 - 0.25).abs() < 1e-9);
        assert!((object.center.1 - 0.75).abs() < 1e-9);
        assert!(object.contains(Cell::new(1, 0)));
        assert!(!object.contains(Cell::new(1, 1)));
    }

    // Tests an all-background grid has no objects
    #[test]
    fn test_background_only() {
        let grid = fixture(&[&[0, 0], &[0, 0]]);
        assert!(extract_objects(&grid).is_empty());
    }

    // Tests subgrids zero non-member cells inside the bounding box
    // Verified by copying the whole bounding box
    #[test]
    fn test_subgrid_masks_other_cells() {
        let grid = fixture(&[&[1, 2], &[1, 1]]);
        let objects = extract_objects(&grid);
        let ones = objects.iter().find(|o| o.value == 1).unwrap();

        assert_eq!(object_subgrid(&grid, ones), fixture(&[&[1, 0], &[1, 1]]));
    }

    // Tests re-embedding a subgrid restores exactly the object's cells
    // Verified by writing background cells of the subgrid too
    #[test]
    fn test_embed_round_trip() {
        let grid = fixture(&[&[1, 2], &[1, 1]]);
        let objects = extract_objects(&grid);
        let ones = objects.iter().find(|o| o.value == 1).unwrap();
        let subgrid = object_subgrid(&grid, ones);

        let blank = fixture(&[&[0, 9], &[0, 0]]);
        let embedded = embed_subgrid(&blank, &subgrid, ones.bounds.min);
        assert_eq!(embedded, fixture(&[&[1, 9], &[1, 1]]));
    }
}
