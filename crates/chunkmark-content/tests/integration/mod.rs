mod end_to_end;
mod grouping_props;
